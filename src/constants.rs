//! Default tuning values shared across the stage, bodies and agents.
//!
//! [`crate::config::StageConfig`] starts from these values; a config file only
//! needs to name the fields it changes.

/// Number of height samples along each side of the terrain.
pub const DEFAULT_RANGE: usize = 512;
/// World units between neighbouring terrain vertices on X and Z.
pub const DEFAULT_SPACING: f32 = 150.0;
/// Multiplier applied to the red channel of the height image.
pub const HEIGHT_MULTIPLIER: i32 = 20;
/// Horizontal distance at which a path follower considers its goal reached.
pub const SNAP_DISTANCE: f32 = 20.0;
/// Yaw applied per accumulated turn input of a player-controlled agent.
pub const PLAYER_TURN_STEP: f32 = 0.01;
/// Yaw applied by a wandering agent when it decides to turn.
pub const WANDER_TURN: f32 = 0.3;
/// Probability per tick that a wandering agent turns.
pub const WANDER_CHANCE: f64 = 0.07;

/// Forward distance of one step for an unscaled body.
pub const DEFAULT_STEP_SIZE: i32 = 48;
/// Forward distance of one step for a body built with explicit scales.
pub const SCALED_STEP_SIZE: i32 = 10;
/// Offset added to X and Z when the facing vectors are co-linear.
pub const COLINEAR_NUDGE: f32 = 0.05;

/// Number of display slots kept by the inspector.
pub const INFO_SLOTS: usize = 20;
/// Slot showing the stage tick counter.
pub const CLOCK_INFO_SLOT: usize = 10;
/// Slot showing the player's location and heading.
pub const PLAYER_INFO_SLOT: usize = 11;
/// Slot showing range rejections.
pub const RANGE_INFO_SLOT: usize = 14;
/// Slot showing a path follower's location and heading.
pub const FOLLOWER_INFO_SLOT: usize = 15;
/// Slot showing a path follower's current goal.
pub const GOAL_INFO_SLOT: usize = 16;
/// Slot showing the distance at which the goal was reached.
pub const DISTANCE_INFO_SLOT: usize = 17;
/// Slot showing the turn counter or path completion.
pub const TURN_INFO_SLOT: usize = 18;
/// Slot showing the last turn-to-face rotation.
pub const ROTATION_INFO_SLOT: usize = 19;
