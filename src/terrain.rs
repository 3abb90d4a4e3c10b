//! Height-mapped ground sampled by entities each tick.
//!
//! A [`HeightField`] holds one integer height per terrain vertex. Vertices sit
//! on a square grid `spacing` world units apart, vertex `(gx, gz)` at world
//! position `(gx * spacing, h, gz * spacing)`. Heights between vertices come
//! from splitting each cell into two triangles along its diagonal.

use image::RgbaImage;
use log::debug;
use thiserror::Error;

use crate::numeric::{channel_to_height, floor_to_index, index_to_f32};

/// Failure while building a [`HeightField`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TerrainError {
    /// The height and color images differ in size.
    #[error("height image is {height:?} but color image is {color:?}")]
    DimensionMismatch {
        /// Width and height of the height image.
        height: (u32, u32),
        /// Width and height of the color image.
        color: (u32, u32),
    },
    /// The terrain must be as wide as it is deep.
    #[error("terrain images must be square, got {width}x{depth}")]
    NotSquare {
        /// Image width.
        width: u32,
        /// Image height, the terrain's Z extent.
        depth: u32,
    },
    /// At least one full cell is required for interpolation.
    #[error("terrain needs at least 2x2 vertices, got {0}")]
    TooSmall(usize),
    /// A raw height vector does not cover `size * size` vertices.
    #[error("expected {expected} heights, got {actual}")]
    LengthMismatch {
        /// `size * size`.
        expected: usize,
        /// Length of the supplied vector.
        actual: usize,
    },
}

/// Precomputed vertex heights answering "how high is the ground at (x, z)?".
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    heights: Vec<i32>,
    size: usize,
    spacing: f32,
}

impl HeightField {
    /// Builds a field from raw heights stored row by row (`z * size + x`).
    ///
    /// # Errors
    /// Returns [`TerrainError::TooSmall`] when `size < 2` and
    /// [`TerrainError::LengthMismatch`] when `heights.len() != size * size`.
    pub fn from_heights(size: usize, spacing: f32, heights: Vec<i32>) -> Result<Self, TerrainError> {
        if size < 2 {
            return Err(TerrainError::TooSmall(size));
        }
        let expected = size.saturating_mul(size);
        if heights.len() != expected {
            return Err(TerrainError::LengthMismatch {
                expected,
                actual: heights.len(),
            });
        }
        Ok(Self {
            heights,
            size,
            spacing,
        })
    }

    /// Builds a field from a height image and a color image of the same size.
    ///
    /// Each height is the pixel's red channel times `multiplier`. The color
    /// image only has its dimensions checked; vertex colors belong to the
    /// renderer.
    ///
    /// # Errors
    /// Returns a [`TerrainError`] when the images differ in size, are not
    /// square, or are smaller than 2x2.
    pub fn from_images(
        height: &RgbaImage,
        color: &RgbaImage,
        spacing: f32,
        multiplier: i32,
    ) -> Result<Self, TerrainError> {
        if height.dimensions() != color.dimensions() {
            return Err(TerrainError::DimensionMismatch {
                height: height.dimensions(),
                color: color.dimensions(),
            });
        }
        let (width, depth) = height.dimensions();
        if width != depth {
            return Err(TerrainError::NotSquare { width, depth });
        }
        // `RgbaImage` stores pixels row by row, matching `z * size + x`.
        let heights = height
            .pixels()
            .map(|pixel| channel_to_height(pixel.0[0], multiplier))
            .collect::<Vec<_>>();
        let size = usize::try_from(width).map_err(|_| TerrainError::NotSquare { width, depth })?;
        debug!("built {size}x{size} height field, spacing {spacing}");
        Self::from_heights(size, spacing, heights)
    }

    /// Vertices along each side.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// World units between neighbouring vertices.
    #[must_use]
    pub const fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Width of the terrain in world units.
    #[must_use]
    pub fn world_extent(&self) -> f32 {
        index_to_f32(self.size) * self.spacing
    }

    /// Stored height of vertex `(gx, gz)`, or `None` outside the grid.
    #[must_use]
    pub fn height_at(&self, gx: usize, gz: usize) -> Option<i32> {
        if gx >= self.size || gz >= self.size {
            return None;
        }
        self.heights.get(gz * self.size + gx).copied()
    }

    /// Height of the ground under world position `(x, z)`.
    ///
    /// Positions whose cell lies outside `[0, size - 2]` on either axis get
    /// `0.0`, so callers see flat ground at the map edge.
    ///
    /// # Examples
    /// ```
    /// use trek::HeightField;
    /// let field = HeightField::from_heights(2, 10.0, vec![0, 10, 20, 30]).unwrap();
    /// assert_eq!(field.surface_height(0.0, 0.0), 0.0);
    /// assert!((field.surface_height(5.0, 0.0) - 5.0).abs() < 1e-6);
    /// assert_eq!(field.surface_height(-1.0, 0.0), 0.0);
    /// ```
    #[must_use]
    pub fn surface_height(&self, x: f32, z: f32) -> f32 {
        let grid_x = x / self.spacing;
        let grid_z = z / self.spacing;
        let (Some(x_pos), Some(z_pos)) = (floor_to_index(grid_x), floor_to_index(grid_z)) else {
            return 0.0;
        };
        let last_cell = self.size - 2;
        if x_pos > last_cell || z_pos > last_cell {
            return 0.0;
        }
        let corners = (
            self.height_at(x_pos, z_pos),
            self.height_at(x_pos + 1, z_pos),
            self.height_at(x_pos, z_pos + 1),
            self.height_at(x_pos + 1, z_pos + 1),
        );
        let (Some(h00), Some(h10), Some(h01), Some(h11)) = corners else {
            return 0.0;
        };
        let fx = grid_x - index_to_f32(x_pos);
        let fz = grid_z - index_to_f32(z_pos);
        triangle_height([h00, h10, h01, h11].map(height_to_f32), fx, fz)
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "Terrain heights are at most a few thousand units."
)]
fn height_to_f32(height: i32) -> f32 {
    height as f32
}

/// Interpolates inside one cell split along the `(1,0)`-`(0,1)` diagonal.
fn triangle_height([h00, h10, h01, h11]: [f32; 4], fx: f32, fz: f32) -> f32 {
    if fx + fz < 1.0 {
        h00 + (h10 - h00) * fx + (h01 - h00) * fz
    } else {
        h11 + (h10 - h11) * (1.0 - fz) + (h01 - h11) * (1.0 - fx)
    }
}
