//! Convenience constructors for terrains, bodies and paths used in tests.

use glam::Vec3;
use trek::{Body, HeightField, NavNode, NavNodeKind, Path, PathPolicy};

/// Square field of `size` vertices at a constant `height`.
///
/// # Panics
/// Panics if `size < 2`.
///
/// # Examples
/// ```
/// use test_utils::fixtures::flat_field;
/// let field = flat_field(4, 10.0, 7);
/// assert_eq!(field.surface_height(12.0, 3.0), 7.0);
/// ```
#[must_use]
pub fn flat_field(size: usize, spacing: f32, height: i32) -> HeightField {
    HeightField::from_heights(size, spacing, vec![height; size * size])
        .expect("flat field dimensions are consistent")
}

/// Field whose vertex `(gx, gz)` has height `10 * gx + 100 * gz`.
///
/// The ramp is planar, so every interpolated height equals
/// `x + 10 * z` for spacing 10.
///
/// # Panics
/// Panics if `size < 2`.
#[must_use]
pub fn ramp_field(size: usize, spacing: f32) -> HeightField {
    let heights = (0..size)
        .flat_map(|gz| (0..size).map(move |gx| ramp_height(gx, gz)))
        .collect();
    HeightField::from_heights(size, spacing, heights).expect("ramp dimensions are consistent")
}

fn ramp_height(gx: usize, gz: usize) -> i32 {
    i32::try_from(10 * gx + 100 * gz).expect("ramp fits in i32")
}

/// Unscaled body with radius 10 at `(x, 0, z)` facing -Z.
#[must_use]
pub fn body_at(name: &str, x: f32, z: f32) -> Body {
    Body::new(name, Vec3::new(x, 0.0, z), Vec3::Y, 0.0, 10.0)
}

/// Waypoints at ground level zero.
#[must_use]
pub fn waypoints(points: &[(f32, f32)]) -> Vec<NavNode> {
    points
        .iter()
        .map(|&(x, z)| NavNode::with_kind(Vec3::new(x, 0.0, z), NavNodeKind::Waypoint))
        .collect()
}

/// Path over [`waypoints`] with the given policy.
#[must_use]
pub fn path_through(points: &[(f32, f32)], policy: PathPolicy) -> Path {
    Path::new(waypoints(points), policy)
}
