//! Agents pair a registered body with the behaviour driving it.
//!
//! Every behaviour ends its tick with [`advance_body`]: the registry moves
//! the body against the collidable set and the range bounds, the body is
//! dropped onto the terrain surface and its bounding sphere is refreshed.

mod follower;
mod player;
mod wander;

pub use follower::PathFollower;
pub use player::PlayerControl;
pub use wander::Wander;

use log::debug;

use crate::body::{Body, MoveOutcome};
use crate::bounds::MovementBounds;
use crate::constants::RANGE_INFO_SLOT;
use crate::inspector::Inspector;
use crate::intent::MovementIntent;
use crate::registry::{BodyId, CollidableRegistry};
use crate::terrain::HeightField;

/// Stage state an agent may touch while it ticks.
pub struct TickContext<'a> {
    /// Every body on the stage.
    pub registry: &'a mut CollidableRegistry,
    /// Permitted movement range.
    pub bounds: &'a dyn MovementBounds,
    /// Ground the bodies stand on.
    pub terrain: &'a HeightField,
    /// Diagnostic display lines.
    pub inspector: &'a mut Inspector,
}

/// How an agent decides its motion.
#[derive(Debug, Clone)]
pub enum Behaviour {
    /// Driven by [`MovementIntent`]s.
    PlayerControlled(PlayerControl),
    /// Walks a [`crate::path::Path`].
    PathFollowing(PathFollower),
    /// Random walk.
    Scripted(Wander),
}

/// A named body with a behaviour.
#[derive(Debug, Clone)]
pub struct Agent {
    name: String,
    body: BodyId,
    behaviour: Behaviour,
}

impl Agent {
    /// Creates an agent driving `body`.
    #[must_use]
    pub fn new(name: impl Into<String>, body: BodyId, behaviour: Behaviour) -> Self {
        Self {
            name: name.into(),
            body,
            behaviour,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry handle of the driven body.
    #[must_use]
    pub const fn body(&self) -> BodyId {
        self.body
    }

    /// Current behaviour.
    #[must_use]
    pub const fn behaviour(&self) -> &Behaviour {
        &self.behaviour
    }

    /// Mutable behaviour.
    pub fn behaviour_mut(&mut self) -> &mut Behaviour {
        &mut self.behaviour
    }

    /// Forwards `intent` to a player-controlled behaviour; other behaviours
    /// ignore it.
    pub fn push_intent(&mut self, intent: MovementIntent) {
        if let Behaviour::PlayerControlled(control) = &mut self.behaviour {
            control.push_intent(intent);
        }
    }

    /// Runs one tick. Returns `None` when the body is no longer registered.
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) -> Option<MoveOutcome> {
        match &mut self.behaviour {
            Behaviour::PlayerControlled(control) => control.tick(&self.name, self.body, ctx),
            Behaviour::PathFollowing(follower) => follower.tick(&self.name, self.body, ctx),
            Behaviour::Scripted(wander) => wander.tick(&self.name, self.body, ctx),
        }
    }
}

/// Moves `id` and settles it on the terrain.
///
/// Range rejections are reported in the inspector; a committed move clears
/// that line.
pub(crate) fn advance_body(
    name: &str,
    id: BodyId,
    ctx: &mut TickContext<'_>,
) -> Option<MoveOutcome> {
    let outcome = ctx.registry.update_body(id, ctx.bounds)?;
    match outcome {
        MoveOutcome::Moved => ctx.inspector.set_info(RANGE_INFO_SLOT, " "),
        MoveOutcome::OutOfRange => {
            debug!("{name} can't move out of range");
            ctx.inspector
                .set_info(RANGE_INFO_SLOT, format!("{name} can't move out of range"));
        }
        MoveOutcome::Collided => debug!("{name} blocked by a collidable body"),
    }
    let body = ctx.registry.get_mut(id)?;
    snap_to_ground(body, ctx.terrain);
    body.update_bounding_sphere();
    Some(outcome)
}

/// Drops `body` vertically onto the terrain surface.
pub fn snap_to_ground(body: &mut Body, terrain: &HeightField) {
    let mut position = body.translation();
    position.y = terrain.surface_height(position.x, position.z);
    body.set_translation(position);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::MockMovementBounds;
    use glam::Vec3;

    fn flat_terrain(height: i32) -> HeightField {
        HeightField::from_heights(8, 100.0, vec![height; 64]).expect("square grid")
    }

    #[test]
    fn rejected_move_reports_range_and_still_grounds() {
        let terrain = flat_terrain(30);
        let mut registry = CollidableRegistry::new();
        let id = registry.insert(
            Body::new("scout", Vec3::new(300.0, 0.0, 300.0), Vec3::Y, 0.0, 5.0),
            true,
        );
        let mut bounds = MockMovementBounds::new();
        bounds.expect_within_range().return_const(false);
        let mut inspector = Inspector::default();
        let mut ctx = TickContext {
            registry: &mut registry,
            bounds: &bounds,
            terrain: &terrain,
            inspector: &mut inspector,
        };

        let outcome = advance_body("scout", id, &mut ctx);

        assert_eq!(outcome, Some(MoveOutcome::OutOfRange));
        assert_eq!(inspector.info(RANGE_INFO_SLOT), "scout can't move out of range");
        let body = registry.get(id).expect("registered body");
        assert_eq!(body.translation(), Vec3::new(300.0, 30.0, 300.0));
        assert_eq!(body.bounding_center(), body.translation());
    }

    #[test]
    fn committed_move_clears_range_line() {
        let terrain = flat_terrain(0);
        let mut registry = CollidableRegistry::new();
        let id = registry.insert(
            Body::new("scout", Vec3::new(300.0, 0.0, 300.0), Vec3::Y, 0.0, 5.0),
            true,
        );
        let mut bounds = MockMovementBounds::new();
        bounds.expect_within_range().return_const(true);
        let mut inspector = Inspector::default();
        inspector.set_info(RANGE_INFO_SLOT, "stale");
        let mut ctx = TickContext {
            registry: &mut registry,
            bounds: &bounds,
            terrain: &terrain,
            inspector: &mut inspector,
        };

        assert_eq!(advance_body("scout", id, &mut ctx), Some(MoveOutcome::Moved));
        assert_eq!(inspector.info(RANGE_INFO_SLOT).trim(), "");
    }
}
