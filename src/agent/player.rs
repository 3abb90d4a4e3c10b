use glam::Mat4;

use super::{advance_body, TickContext};
use crate::body::MoveOutcome;
use crate::constants::PLAYER_INFO_SLOT;
use crate::intent::MovementIntent;
use crate::numeric::turn_radians;
use crate::registry::BodyId;

/// Input-driven motion.
///
/// Intents accumulate until the next tick and are consumed by it, so a body
/// only moves on ticks that received input.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerControl {
    rotate: i32,
    pending_step: i32,
    reset_requested: bool,
    turn_step: f32,
    initial_orientation: Mat4,
}

impl PlayerControl {
    /// Creates a controller that restores `initial_orientation` on reset.
    #[must_use]
    pub const fn new(initial_orientation: Mat4, turn_step: f32) -> Self {
        Self {
            rotate: 0,
            pending_step: 0,
            reset_requested: false,
            turn_step,
            initial_orientation,
        }
    }

    /// Adds one intent to this tick's input. Several calls per tick add up.
    pub fn push_intent(&mut self, intent: MovementIntent) {
        self.rotate += intent.turn.sign();
        self.pending_step += intent.stride.sign();
        self.reset_requested |= intent.reset_orientation;
    }

    /// Accumulated turn inputs.
    #[must_use]
    pub const fn pending_turn(&self) -> i32 {
        self.rotate
    }

    /// Accumulated step inputs.
    #[must_use]
    pub const fn pending_step(&self) -> i32 {
        self.pending_step
    }

    /// Orientation restored by a reset intent.
    #[must_use]
    pub const fn initial_orientation(&self) -> Mat4 {
        self.initial_orientation
    }

    pub(super) fn tick(
        &mut self,
        name: &str,
        id: BodyId,
        ctx: &mut TickContext<'_>,
    ) -> Option<MoveOutcome> {
        let body = ctx.registry.get_mut(id)?;
        if self.reset_requested {
            body.set_orientation(self.initial_orientation);
        }
        body.set_yaw(turn_radians(self.rotate, self.turn_step));
        body.set_step(self.pending_step);

        let outcome = advance_body(name, id, ctx);

        self.rotate = 0;
        self.pending_step = 0;
        self.reset_requested = false;
        let body = ctx.registry.get_mut(id)?;
        body.set_step(0);
        let location = body.translation();
        let forward = body.forward();
        let spacing = ctx.terrain.spacing();
        ctx.inspector.set_info(
            PLAYER_INFO_SLOT,
            format!(
                "{name}:   Location ({:5.0},{:3.0},{:5.0})  Looking at ({:5.2},{:5.2},{:5.2})",
                location.x / spacing,
                location.y,
                location.z / spacing,
                forward.x,
                forward.y,
                forward.z
            ),
        );
        outcome
    }
}
