//! The stage owns every body and agent and advances them one tick at a time.
//!
//! Agents run strictly in spawn order. Each agent's move is committed before
//! the next agent runs, so collision checks always see the latest positions.

use glam::Vec3;
use image::RgbaImage;
use log::{debug, warn};

use crate::agent::{
    snap_to_ground, Agent, Behaviour, PathFollower, PlayerControl, TickContext, Wander,
};
use crate::body::{Body, MoveOutcome};
use crate::bounds::StageBounds;
use crate::config::StageConfig;
use crate::constants::{CLOCK_INFO_SLOT, ROTATION_INFO_SLOT};
use crate::inspector::Inspector;
use crate::intent::MovementIntent;
use crate::path::Path;
use crate::registry::{BodyId, CollidableRegistry};
use crate::terrain::{HeightField, TerrainError};

/// Terrain, bodies and agents for one simulation.
#[derive(Debug, Clone)]
pub struct Stage {
    config: StageConfig,
    terrain: HeightField,
    bounds: StageBounds,
    registry: CollidableRegistry,
    inspector: Inspector,
    agents: Vec<Agent>,
    ticks: u64,
}

impl Stage {
    /// Creates an empty stage over `terrain`.
    ///
    /// The movement range is derived from the terrain's own extent.
    #[must_use]
    pub fn new(config: StageConfig, terrain: HeightField) -> Self {
        let bounds = StageBounds::new(terrain.spacing(), terrain.world_extent());
        let inspector = Inspector::new(config.info_slots);
        Self {
            config,
            terrain,
            bounds,
            registry: CollidableRegistry::new(),
            inspector,
            agents: Vec::new(),
            ticks: 0,
        }
    }

    /// Builds the terrain from height and color images using the configured
    /// spacing and height multiplier.
    ///
    /// # Errors
    /// Returns a [`TerrainError`] when the images cannot form a terrain.
    pub fn from_images(
        config: StageConfig,
        height: &RgbaImage,
        color: &RgbaImage,
    ) -> Result<Self, TerrainError> {
        let terrain =
            HeightField::from_images(height, color, config.spacing, config.height_multiplier)?;
        Ok(Self::new(config, terrain))
    }

    /// Places a static collidable body on the ground.
    pub fn add_obstacle(&mut self, name: &str, x: f32, z: f32, radius: f32) -> BodyId {
        let position = Vec3::new(x, self.terrain.surface_height(x, z), z);
        let mut body = Body::new(name, position, Vec3::Y, 0.0, radius);
        body.reset_motion();
        debug!("obstacle {name} at {position}");
        self.registry.insert(body, true)
    }

    /// Registers a collidable body driven by movement intents.
    pub fn spawn_player(&mut self, mut body: Body) -> BodyId {
        self.ground(&mut body);
        body.set_step(0);
        let control = PlayerControl::new(body.orientation(), self.config.player_turn_step);
        self.spawn(body, true, Behaviour::PlayerControlled(control))
    }

    /// Registers a body that walks `path`, turned toward its first waypoint.
    ///
    /// Followers are not collidable, so other bodies walk through them.
    pub fn spawn_follower(&mut self, mut body: Body, path: Path) -> BodyId {
        self.ground(&mut body);
        let follower = PathFollower::new(path, self.config.snap_distance);
        match follower.face_goal(&mut body) {
            Some(Ok(rotation)) => self
                .inspector
                .set_info(ROTATION_INFO_SLOT, rotation.to_string()),
            Some(Err(err)) => {
                warn!("{} could not face its first waypoint: {err}", body.name());
                self.inspector.set_info(ROTATION_INFO_SLOT, err.to_string());
            }
            None => warn!("{} was given an empty path", body.name()),
        }
        self.spawn(body, false, Behaviour::PathFollowing(follower))
    }

    /// Registers a collidable body that wanders randomly.
    pub fn spawn_wanderer(&mut self, mut body: Body, seed: u64) -> BodyId {
        self.ground(&mut body);
        let wander = Wander::new(self.config.wander_turn, self.config.wander_chance, seed);
        self.spawn(body, true, Behaviour::Scripted(wander))
    }

    fn spawn(&mut self, body: Body, collidable: bool, behaviour: Behaviour) -> BodyId {
        let name = body.name().to_owned();
        let id = self.registry.insert(body, collidable);
        debug!("spawned {name} as body {}", id.index());
        self.agents.push(Agent::new(name, id, behaviour));
        id
    }

    fn ground(&self, body: &mut Body) {
        snap_to_ground(body, &self.terrain);
        body.update_bounding_sphere();
    }

    /// Runs one tick: `intent` goes to every player-controlled agent, then
    /// each agent moves in spawn order.
    ///
    /// Returns the move outcome of every agent that still has a body.
    pub fn tick(&mut self, intent: MovementIntent) -> Vec<(BodyId, MoveOutcome)> {
        self.ticks += 1;
        self.inspector
            .set_info(CLOCK_INFO_SLOT, format!("tick {}", self.ticks));
        if !intent.is_idle() {
            for agent in &mut self.agents {
                agent.push_intent(intent);
            }
        }

        let mut ctx = TickContext {
            registry: &mut self.registry,
            bounds: &self.bounds,
            terrain: &self.terrain,
            inspector: &mut self.inspector,
        };
        self.agents
            .iter_mut()
            .filter_map(|agent| agent.tick(&mut ctx).map(|outcome| (agent.body(), outcome)))
            .collect()
    }

    /// Ground height at world position `(x, z)`.
    #[must_use]
    pub fn surface_height(&self, x: f32, z: f32) -> f32 {
        self.terrain.surface_height(x, z)
    }

    /// Drops body `id` onto the terrain. Returns `false` for unknown ids.
    pub fn set_surface_height(&mut self, id: BodyId) -> bool {
        let Some(body) = self.registry.get_mut(id) else {
            return false;
        };
        snap_to_ground(body, &self.terrain);
        true
    }

    /// Body behind `id`.
    #[must_use]
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.registry.get(id)
    }

    /// Agent driving body `id`.
    #[must_use]
    pub fn agent(&self, id: BodyId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.body() == id)
    }

    /// Agents in tick order.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// All bodies and the collidable set.
    #[must_use]
    pub const fn registry(&self) -> &CollidableRegistry {
        &self.registry
    }

    /// Diagnostic display lines.
    #[must_use]
    pub const fn inspector(&self) -> &Inspector {
        &self.inspector
    }

    /// Ground the stage stands on.
    #[must_use]
    pub const fn terrain(&self) -> &HeightField {
        &self.terrain
    }

    /// Permitted movement range.
    #[must_use]
    pub const fn bounds(&self) -> &StageBounds {
        &self.bounds
    }

    /// Configuration the stage was built with.
    #[must_use]
    pub const fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Ticks run so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }
}
