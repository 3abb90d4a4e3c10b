//! Permitted horizontal range for moving bodies.

use glam::Vec3;

/// Answers whether a body may occupy a horizontal position.
#[cfg_attr(test, mockall::automock)]
pub trait MovementBounds {
    /// Returns `true` when `position` lies inside the playable area.
    fn within_range(&self, position: Vec3) -> bool;
}

/// Rectangular play area keeping one vertex of margin on the low edges and
/// two on the high edges of the terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageBounds {
    spacing: f32,
    terrain_size: f32,
}

impl StageBounds {
    /// Creates bounds for a terrain `terrain_size` units wide.
    #[must_use]
    pub const fn new(spacing: f32, terrain_size: f32) -> Self {
        Self {
            spacing,
            terrain_size,
        }
    }

    /// Smallest permitted X or Z.
    #[must_use]
    pub const fn min(&self) -> f32 {
        self.spacing
    }

    /// Largest permitted X or Z.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.terrain_size - 2.0 * self.spacing
    }
}

impl MovementBounds for StageBounds {
    fn within_range(&self, position: Vec3) -> bool {
        let (min, max) = (self.min(), self.max());
        (min..=max).contains(&position.x) && (min..=max).contains(&position.z)
    }
}
