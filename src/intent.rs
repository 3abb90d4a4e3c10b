//! Per-tick movement requests for player-controlled agents.

/// Turning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Turn {
    /// Counter-clockwise seen from above.
    Left,
    /// Clockwise seen from above.
    Right,
    /// Keep the current heading.
    #[default]
    Hold,
}

impl Turn {
    /// `+1` for left, `-1` for right, `0` otherwise.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Left => 1,
            Self::Right => -1,
            Self::Hold => 0,
        }
    }
}

/// Stepping request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stride {
    /// One step along the facing direction.
    Forward,
    /// One step against the facing direction.
    Backward,
    /// Stand still.
    #[default]
    Hold,
}

impl Stride {
    /// `+1` for forward, `-1` for backward, `0` otherwise.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
            Self::Hold => 0,
        }
    }
}

/// Input gathered for one tick.
///
/// # Examples
/// ```
/// use trek::{MovementIntent, Stride, Turn};
/// let intent = MovementIntent::new(Turn::Left, Stride::Forward);
/// assert_eq!(intent.turn.sign(), 1);
/// assert!(!intent.reset_orientation);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MovementIntent {
    /// Requested turn.
    pub turn: Turn,
    /// Requested step.
    pub stride: Stride,
    /// Restore the agent's starting orientation before moving.
    pub reset_orientation: bool,
}

impl MovementIntent {
    /// Intent without an orientation reset.
    #[must_use]
    pub const fn new(turn: Turn, stride: Stride) -> Self {
        Self {
            turn,
            stride,
            reset_orientation: false,
        }
    }

    /// Intent that only restores the starting orientation.
    #[must_use]
    pub const fn reset() -> Self {
        Self {
            turn: Turn::Hold,
            stride: Stride::Hold,
            reset_orientation: true,
        }
    }

    /// `true` when the intent requests nothing.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.turn, Turn::Hold)
            && matches!(self.stride, Stride::Hold)
            && !self.reset_orientation
    }
}
