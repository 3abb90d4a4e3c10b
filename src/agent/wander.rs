use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{advance_body, TickContext};
use crate::body::MoveOutcome;
use crate::registry::BodyId;

/// Seeded random walk: keep stepping and occasionally turn left or right.
#[derive(Debug, Clone)]
pub struct Wander {
    turn_angle: f32,
    turn_chance: f64,
    rng: StdRng,
}

impl Wander {
    /// Creates a walker turning `turn_angle` radians with probability
    /// `turn_chance` per tick.
    #[must_use]
    pub fn new(turn_angle: f32, turn_chance: f64, seed: u64) -> Self {
        let turn_chance = if turn_chance.is_nan() {
            0.0
        } else {
            turn_chance.clamp(0.0, 1.0)
        };
        Self {
            turn_angle,
            turn_chance,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Magnitude of each turn in radians.
    #[must_use]
    pub const fn turn_angle(&self) -> f32 {
        self.turn_angle
    }

    /// Probability of turning on a given tick.
    #[must_use]
    pub const fn turn_chance(&self) -> f64 {
        self.turn_chance
    }

    /// Yaw for the coming tick.
    fn next_yaw(&mut self) -> f32 {
        if !self.rng.gen_bool(self.turn_chance) {
            return 0.0;
        }
        if self.rng.gen_bool(0.5) {
            -self.turn_angle
        } else {
            self.turn_angle
        }
    }

    pub(super) fn tick(
        &mut self,
        name: &str,
        id: BodyId,
        ctx: &mut TickContext<'_>,
    ) -> Option<MoveOutcome> {
        let yaw = self.next_yaw();
        ctx.registry.get_mut(id)?.set_yaw(yaw);
        advance_body(name, id, ctx)
    }
}
