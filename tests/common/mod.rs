//! Shared stage setup for integration tests.

use test_utils::fixtures::flat_field;
use trek::{BodyId, MoveOutcome, Stage, StageConfig};

/// Flat 32x32 stage with spacing 100, so bodies may roam `[100, 2900]`.
pub fn flat_stage() -> Stage {
    Stage::new(StageConfig::default(), flat_field(32, 100.0, 0))
}

/// Outcome reported for `id` by [`Stage::tick`].
pub fn outcome_of(outcomes: &[(BodyId, MoveOutcome)], id: BodyId) -> Option<MoveOutcome> {
    outcomes
        .iter()
        .find(|(body, _)| *body == id)
        .map(|(_, outcome)| *outcome)
}
