use glam::Vec3;
use log::{debug, warn};

use super::{advance_body, TickContext};
use crate::body::{Body, FacingError, MoveOutcome, Rotation};
use crate::constants::{
    DISTANCE_INFO_SLOT, FOLLOWER_INFO_SLOT, GOAL_INFO_SLOT, ROTATION_INFO_SLOT, TURN_INFO_SLOT,
};
use crate::inspector::Inspector;
use crate::nav_node::NavNode;
use crate::path::Path;
use crate::registry::BodyId;
use crate::vector_math::horizontal_distance;

/// Walks a [`Path`], turning toward each waypoint once the previous one is
/// within snap distance.
#[derive(Debug, Clone)]
pub struct PathFollower {
    path: Path,
    goal: Option<NavNode>,
    snap_distance: f32,
    turn_count: u32,
}

impl PathFollower {
    /// Takes the first goal from `path`.
    #[must_use]
    pub fn new(mut path: Path, snap_distance: f32) -> Self {
        let goal = path.next_node().cloned();
        Self {
            path,
            goal,
            snap_distance,
            turn_count: 0,
        }
    }

    /// Turns `body` toward the current goal.
    ///
    /// Returns `None` when the path had no nodes.
    pub fn face_goal(&self, body: &mut Body) -> Option<Result<Rotation, FacingError>> {
        self.goal.as_ref().map(|goal| body.turn_to_face(goal.position()))
    }

    /// Waypoint currently steered toward.
    #[must_use]
    pub const fn goal(&self) -> Option<&NavNode> {
        self.goal.as_ref()
    }

    /// Path being walked.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Number of waypoints turned toward after the first.
    #[must_use]
    pub const fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Goal reach distance on the horizontal plane.
    #[must_use]
    pub const fn snap_distance(&self) -> f32 {
        self.snap_distance
    }

    pub(super) fn tick(
        &mut self,
        name: &str,
        id: BodyId,
        ctx: &mut TickContext<'_>,
    ) -> Option<MoveOutcome> {
        let body = ctx.registry.get(id)?;
        let location = body.translation();
        let forward = body.forward();
        ctx.inspector.set_info(
            FOLLOWER_INFO_SLOT,
            format!(
                "{name}:  Location ({:.0},{:.0},{:.0})  Looking at ({:.2},{:.2},{:.2})",
                location.x, location.y, location.z, forward.x, forward.y, forward.z
            ),
        );

        if let Some(goal) = self.goal.as_ref().map(NavNode::position) {
            ctx.inspector.set_info(
                GOAL_INFO_SLOT,
                format!("nextGoal:  ({:.0},{:.0},{:.0})", goal.x, goal.y, goal.z),
            );
            let distance = horizontal_distance(goal, location);
            if distance <= self.snap_distance {
                ctx.inspector.set_info(
                    DISTANCE_INFO_SLOT,
                    format!("distance to goal = {distance:5.2}"),
                );
                self.advance_goal(name, id, ctx);
            }
        }

        advance_body(name, id, ctx)
    }

    fn advance_goal(&mut self, name: &str, id: BodyId, ctx: &mut TickContext<'_>) {
        self.goal = self.path.next_node().cloned();
        let target = self.goal.as_ref().map(NavNode::position);
        if let (Some(target), Some(body)) = (target, ctx.registry.get_mut(id)) {
            report_facing(name, target, body.turn_to_face(target), ctx.inspector);
        }
        if self.path.is_done() {
            ctx.inspector
                .set_info(TURN_INFO_SLOT, "path traversal is done");
        } else {
            self.turn_count = self.turn_count.saturating_add(1);
            ctx.inspector.set_info(
                TURN_INFO_SLOT,
                format!("turnToFace count = {}", self.turn_count),
            );
        }
    }
}

fn report_facing(
    name: &str,
    target: Vec3,
    facing: Result<Rotation, FacingError>,
    inspector: &mut Inspector,
) {
    match facing {
        Ok(rotation) => {
            debug!("{name} turned toward {target}: {rotation}");
            inspector.set_info(ROTATION_INFO_SLOT, rotation.to_string());
        }
        Err(err) => {
            warn!("{name} could not turn toward {target}: {err}");
            inspector.set_info(ROTATION_INFO_SLOT, err.to_string());
        }
    }
}
