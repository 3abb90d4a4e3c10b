//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions between the floating-point world space
//! and the integer grid and step domains.

/// Floor a world-to-grid ratio and convert it to an index.
///
/// Returns `None` for negative or non-finite values and for values beyond the
/// `usize` domain.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "The floored value is validated against the usize domain."
)]
#[must_use]
pub fn floor_to_index(value: f32) -> Option<usize> {
    if !value.is_finite() {
        return None;
    }
    let floored = value.floor();
    if floored < 0.0 || floored >= usize::MAX as f32 {
        return None;
    }
    Some(floored as usize)
}

/// Convert a grid index into `f32` for interpolation arithmetic.
#[expect(
    clippy::cast_precision_loss,
    reason = "Grid indices stay far below the f32 mantissa limit."
)]
#[must_use]
pub fn index_to_f32(index: usize) -> f32 {
    index as f32
}

/// Forward distance covered by `step` steps of `step_size` units.
#[expect(
    clippy::cast_precision_loss,
    reason = "Step products are small integers representable in f32."
)]
#[must_use]
pub fn step_distance(step: i32, step_size: i32) -> f32 {
    (i64::from(step) * i64::from(step_size)) as f32
}

/// Yaw produced by `turns` accumulated turn inputs of `turn_step` radians.
#[expect(
    clippy::cast_precision_loss,
    reason = "Turn inputs accumulate over a single tick and stay tiny."
)]
#[must_use]
pub fn turn_radians(turns: i32, turn_step: f32) -> f32 {
    turns as f32 * turn_step
}

/// Scale an 8-bit channel value into terrain height units.
#[must_use]
pub fn channel_to_height(channel: u8, multiplier: i32) -> i32 {
    i32::from(channel).saturating_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, Some(0))]
    #[case(2.75, Some(2))]
    #[case(-0.25, None)]
    #[case(f32::NAN, None)]
    #[case(f32::INFINITY, None)]
    fn floors_to_grid_index(#[case] value: f32, #[case] expected: Option<usize>) {
        assert_eq!(floor_to_index(value), expected);
    }

    #[test]
    fn step_distance_keeps_sign() {
        assert_eq!(step_distance(-2, 48), -96.0);
        assert_eq!(step_distance(0, 48), 0.0);
    }

    #[test]
    fn channel_height_uses_multiplier() {
        assert_eq!(channel_to_height(255, 20), 5100);
        assert_eq!(channel_to_height(0, 20), 0);
    }
}
