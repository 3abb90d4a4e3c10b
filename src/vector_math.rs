//! Horizontal-plane vector helpers.
//! All terrain movement and facing happens on the flat XZ plane.
use glam::Vec3;

/// Projects a vector onto the XZ plane by zeroing its Y component.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use trek::vector_math::flatten;
/// assert_eq!(flatten(Vec3::new(3.0, 7.0, 4.0)), Vec3::new(3.0, 0.0, 4.0));
/// ```
#[must_use]
pub const fn flatten(vector: Vec3) -> Vec3 {
    Vec3::new(vector.x, 0.0, vector.z)
}

/// Distance between two points measured on the XZ plane.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use trek::horizontal_distance;
/// let d = horizontal_distance(Vec3::new(0.0, 50.0, 0.0), Vec3::new(3.0, -9.0, 4.0));
/// assert!((d - 5.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(a).distance(flatten(b))
}

/// Sum of the components, used to pick a rotation branch when facing.
#[must_use]
pub fn component_sum(vector: Vec3) -> f32 {
    vector.x + vector.y + vector.z
}
