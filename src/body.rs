//! Placed, oriented and movable bodies.
//!
//! A [`Body`] keeps its whole placement in one 4x4 matrix: the upper 3x3
//! holds scale and rotation, the translation column holds the position. The
//! local axes are read straight from the matrix columns: X is right, Y is up
//! and +Z is backward, so bodies face -Z.
//!
//! Every tick a body first applies its yaw, pitch and roll about its own
//! center, then tries to step forward. The step is committed only when the
//! candidate position neither collides with another collidable body nor
//! leaves the playable range.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use glam::{Mat4, Vec3, Vec4};
use thiserror::Error;

use crate::bounds::MovementBounds;
use crate::constants::{COLINEAR_NUDGE, DEFAULT_STEP_SIZE, SCALED_STEP_SIZE};
use crate::numeric::step_distance;
use crate::vector_math::{component_sum, flatten};

/// Result of one [`Body::update_movable_object`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The candidate position was committed.
    Moved,
    /// The candidate position overlapped another collidable body.
    Collided,
    /// The candidate position left the permitted range.
    OutOfRange,
}

/// Rotation applied by [`Body::turn_to_face`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Angle in radians about `axis`.
    pub angle: f32,
    /// Unit rotation axis.
    pub axis: Vec3,
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "radian to rotate = {:5.2}, axis for rotation ({:5.2}, {:5.2}, {:5.2})",
            self.angle, self.axis.x, self.axis.y, self.axis.z
        )
    }
}

/// Turn-to-face geometry that cannot produce a rotation this tick.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum FacingError {
    /// The rotation angle came out as NaN, typically a target on top of the
    /// body.
    #[error("radian NaN")]
    NanAngle,
    /// The body has no backward axis to rotate, typically after a zero
    /// scale.
    #[error("degenerate rotation axis for angle {angle:.2}")]
    DegenerateAxis {
        /// The angle that would have been applied.
        angle: f32,
    },
}

/// A transformable entity on the stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String,
    orientation: Mat4,
    scales: Vec3,
    pitch: f32,
    yaw: f32,
    roll: f32,
    step: i32,
    step_size: i32,
    base_radius: f32,
    sphere_radius: f32,
    sphere_center: Vec3,
    sphere_world: Mat4,
}

impl Body {
    /// Creates an unscaled body at `position`, rotated `radians` about
    /// `orient_axis`.
    ///
    /// `base_radius` is the bounding radius of the mesh the body stands for.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        position: Vec3,
        orient_axis: Vec3,
        radians: f32,
        base_radius: f32,
    ) -> Self {
        Self::build(
            name.into(),
            Placement {
                position,
                orient_axis,
                radians,
                scales: Vec3::ONE,
            },
            base_radius,
            DEFAULT_STEP_SIZE,
        )
    }

    /// Creates a body that is scaled before being rotated and placed.
    #[must_use]
    pub fn with_scales(
        name: impl Into<String>,
        position: Vec3,
        orient_axis: Vec3,
        radians: f32,
        scales: Vec3,
        base_radius: f32,
    ) -> Self {
        Self::build(
            name.into(),
            Placement {
                position,
                orient_axis,
                radians,
                scales,
            },
            base_radius,
            SCALED_STEP_SIZE,
        )
    }

    fn build(name: String, placement: Placement, base_radius: f32, step_size: i32) -> Self {
        let axis = placement.orient_axis.try_normalize().unwrap_or(Vec3::Y);
        let orientation = Mat4::from_translation(placement.position)
            * Mat4::from_axis_angle(axis, placement.radians)
            * Mat4::from_scale(placement.scales);
        let mut body = Self {
            name,
            orientation,
            scales: placement.scales,
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            step: 1,
            step_size,
            base_radius,
            sphere_radius: base_radius * placement.scales.max_element(),
            sphere_center: placement.position,
            sphere_world: Mat4::IDENTITY,
        };
        body.update_bounding_sphere();
        body
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full placement matrix.
    #[must_use]
    pub const fn orientation(&self) -> Mat4 {
        self.orientation
    }

    /// Replaces the placement matrix, for example to restore a saved pose.
    pub fn set_orientation(&mut self, orientation: Mat4) {
        self.orientation = orientation;
    }

    /// Current position.
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.orientation.w_axis.truncate()
    }

    /// Moves the body without touching its rotation.
    pub fn set_translation(&mut self, position: Vec3) {
        self.orientation.w_axis = position.extend(1.0);
    }

    /// Local X axis.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.orientation.x_axis.truncate()
    }

    /// Local Y axis.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.orientation.y_axis.truncate()
    }

    /// Overwrites the local Y axis.
    pub fn set_up(&mut self, up: Vec3) {
        let w = self.orientation.y_axis.w;
        self.orientation.y_axis = Vec4::new(up.x, up.y, up.z, w);
    }

    /// Direction the body steps along, its local -Z.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        -self.backward()
    }

    /// Local +Z axis.
    #[must_use]
    pub fn backward(&self) -> Vec3 {
        self.orientation.z_axis.truncate()
    }

    /// Scale factors the body was built with.
    #[must_use]
    pub const fn scales(&self) -> Vec3 {
        self.scales
    }

    /// Pending rotation about the local X axis.
    #[must_use]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Pending rotation about the vertical axis.
    #[must_use]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pending rotation about the local Z axis.
    #[must_use]
    pub const fn roll(&self) -> f32 {
        self.roll
    }

    /// Sets the pending pitch.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    /// Sets the pending yaw.
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    /// Sets the pending roll.
    pub fn set_roll(&mut self, roll: f32) {
        self.roll = roll;
    }

    /// Adds to the pending rotation. Nothing moves until
    /// [`Self::update_movable_object`].
    pub fn apply_turn(&mut self, yaw: f32, pitch: f32, roll: f32) {
        self.yaw += yaw;
        self.pitch += pitch;
        self.roll += roll;
    }

    /// Steps taken per update; negative steps walk backward.
    #[must_use]
    pub const fn step(&self) -> i32 {
        self.step
    }

    /// Sets the steps taken per update.
    pub fn set_step(&mut self, step: i32) {
        self.step = step;
    }

    /// World units per step.
    #[must_use]
    pub const fn step_size(&self) -> i32 {
        self.step_size
    }

    /// Sets the world units per step.
    pub fn set_step_size(&mut self, step_size: i32) {
        self.step_size = step_size;
    }

    /// Clears pending rotation and stepping.
    pub fn reset_motion(&mut self) {
        self.pitch = 0.0;
        self.yaw = 0.0;
        self.roll = 0.0;
        self.step = 0;
    }

    /// Bounding radius of the unscaled mesh.
    #[must_use]
    pub const fn base_radius(&self) -> f32 {
        self.base_radius
    }

    /// World-space bounding radius used for collisions.
    #[must_use]
    pub const fn bounding_radius(&self) -> f32 {
        self.sphere_radius
    }

    /// Bounding-sphere center as of the last [`Self::update_bounding_sphere`].
    #[must_use]
    pub const fn bounding_center(&self) -> Vec3 {
        self.sphere_center
    }

    /// Transform placing a unit sphere over the bounding sphere.
    #[must_use]
    pub const fn bounding_world(&self) -> Mat4 {
        self.sphere_world
    }

    /// Re-centers the cached bounding sphere on the current position.
    pub fn update_bounding_sphere(&mut self) {
        self.sphere_center = self.translation();
        self.sphere_world = Mat4::from_translation(self.sphere_center)
            * Mat4::from_scale(Vec3::splat(self.sphere_radius));
    }

    /// Would this body at `position` touch any of `others`?
    ///
    /// Distances are measured to the others' current positions, and touching
    /// spheres count as a collision. `others` must not contain this body.
    #[must_use]
    pub fn collides_at<'a, I>(&self, position: Vec3, others: I) -> bool
    where
        I: IntoIterator<Item = &'a Self>,
    {
        others.into_iter().any(|other| {
            position.distance(other.translation()) <= self.sphere_radius + other.sphere_radius
        })
    }

    /// Applies this tick's rotation and forward step.
    ///
    /// Yaw, pitch and roll are applied about the body's center in that
    /// order. The step candidate is then checked against `others` first and
    /// `bounds` second; a rejected step leaves the position exactly as it
    /// was.
    pub fn update_movable_object<'a, I, B>(&mut self, others: I, bounds: &B) -> MoveOutcome
    where
        I: IntoIterator<Item = &'a Self>,
        B: MovementBounds + ?Sized,
    {
        let start = self.translation();
        self.orientation = Mat4::from_translation(-start) * self.orientation;
        self.orientation = Mat4::from_rotation_y(self.yaw) * self.orientation;
        self.orientation = Mat4::from_rotation_x(self.pitch) * self.orientation;
        self.orientation = Mat4::from_rotation_z(self.roll) * self.orientation;
        let stop = start + step_distance(self.step, self.step_size) * self.forward();

        let outcome = if self.collides_at(stop, others) {
            MoveOutcome::Collided
        } else if bounds.within_range(stop) {
            MoveOutcome::Moved
        } else {
            MoveOutcome::OutOfRange
        };
        let resting = if outcome == MoveOutcome::Moved {
            stop
        } else {
            start
        };
        self.orientation = Mat4::from_translation(resting) * self.orientation;
        outcome
    }

    /// Turns the body about the vertical axis so it faces `target` on the XZ
    /// plane.
    ///
    /// Bodies look down -Z, so the rotation aligns the backward axis with the
    /// direction from the target back to the body. The rotation branch is
    /// chosen from the sign of the axis component sum, and the up axis is
    /// forced back to world up afterwards.
    ///
    /// # Errors
    /// Returns a [`FacingError`] and leaves the body untouched when the
    /// geometry yields no usable angle or axis.
    pub fn turn_to_face(&mut self, target: Vec3) -> Result<Rotation, FacingError> {
        let location = self.translation();
        let to_obj = flatten(location);
        let mut to_target = (to_obj - flatten(target)).normalize();
        let to_obj = to_obj.normalize();
        if to_target == to_obj || -to_target == to_obj {
            to_target.x += COLINEAR_NUDGE;
            to_target.z += COLINEAR_NUDGE;
            to_target = to_target.normalize();
        }

        let backward = self.backward();
        let axis = to_target.cross(backward).try_normalize();
        let cos_angle = to_target.dot(backward).acos();
        if cos_angle.is_nan() {
            return Err(FacingError::NanAngle);
        }
        let (angle, axis) = match axis {
            Some(axis) if cos_angle == 0.0 => (TAU, axis),
            Some(axis) if cos_angle == PI => (PI, axis),
            Some(axis) if component_sum(axis) >= 0.0 => (TAU - cos_angle, axis),
            Some(axis) => (-cos_angle, axis),
            // Parallel facing vectors have no cross product; facing is
            // horizontal, so world up is the rotation axis.
            None if backward.length_squared() > 0.0 => {
                let angle = if cos_angle < FRAC_PI_2 { TAU } else { PI };
                (angle, Vec3::Y)
            }
            None => return Err(FacingError::DegenerateAxis { angle: cos_angle }),
        };

        self.orientation = Mat4::from_translation(-location) * self.orientation;
        self.orientation = Mat4::from_axis_angle(axis, angle) * self.orientation;
        self.set_up(Vec3::Y);
        self.orientation = Mat4::from_translation(location) * self.orientation;
        Ok(Rotation { angle, axis })
    }
}

struct Placement {
    position: Vec3,
    orient_axis: Vec3,
    radians: f32,
    scales: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::MockMovementBounds;
    use approx::assert_relative_eq;

    fn open_bounds() -> MockMovementBounds {
        let mut bounds = MockMovementBounds::new();
        bounds.expect_within_range().return_const(true);
        bounds
    }

    fn walker(position: Vec3) -> Body {
        Body::new("walker", position, Vec3::Y, 0.0, 10.0)
    }

    #[test]
    fn steps_forward_along_negative_z() {
        let mut body = walker(Vec3::new(500.0, 0.0, 500.0));
        let outcome = body.update_movable_object([], &open_bounds());
        assert_eq!(outcome, MoveOutcome::Moved);
        assert_relative_eq!(body.translation().z, 452.0, epsilon = 1e-4);
        assert_relative_eq!(body.translation().x, 500.0, epsilon = 1e-4);
    }

    #[test]
    fn yaw_turns_before_stepping() {
        let mut body = walker(Vec3::new(500.0, 0.0, 500.0));
        body.set_yaw(FRAC_PI_2);
        body.set_step(0);
        let outcome = body.update_movable_object([], &open_bounds());
        assert_eq!(outcome, MoveOutcome::Moved);
        // Rotating -Z a quarter turn about +Y points the body down -X.
        assert_relative_eq!(body.forward().x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(body.forward().z, 0.0, epsilon = 1e-5);
        assert_eq!(body.translation(), Vec3::new(500.0, 0.0, 500.0));
    }

    #[test]
    fn apply_turn_accumulates_until_the_next_update() {
        let mut body = walker(Vec3::new(500.0, 0.0, 500.0));
        body.apply_turn(0.1, -0.05, 0.2);
        body.apply_turn(0.2, -0.05, 0.1);
        assert_relative_eq!(body.yaw(), 0.3, epsilon = 1e-6);
        assert_relative_eq!(body.pitch(), -0.1, epsilon = 1e-6);
        assert_relative_eq!(body.roll(), 0.3, epsilon = 1e-6);
        assert_eq!(body.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn pitch_and_roll_follow_yaw() {
        let (yaw, pitch, roll) = (0.4_f32, 0.3_f32, 0.2_f32);
        let mut body = walker(Vec3::new(500.0, 0.0, 500.0));
        body.apply_turn(yaw, pitch, roll);
        body.set_step(0);
        body.update_movable_object([], &open_bounds());

        // -Z rotated about Y, then X, then Z.
        let (sy, cy) = yaw.sin_cos();
        let (sp, cp) = pitch.sin_cos();
        let (sr, cr) = roll.sin_cos();
        let expected = Vec3::new(
            -sy * cr - cy * sp * sr,
            -sy * sr + cy * sp * cr,
            -cy * cp,
        );
        let forward = body.forward();
        assert_relative_eq!(forward.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(forward.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(forward.z, expected.z, epsilon = 1e-5);
        assert_eq!(body.translation(), Vec3::new(500.0, 0.0, 500.0));
    }

    #[test]
    fn collision_skips_range_check() {
        let mut body = walker(Vec3::new(500.0, 0.0, 500.0));
        let blocker = walker(Vec3::new(500.0, 0.0, 440.0));
        let mut bounds = MockMovementBounds::new();
        bounds.expect_within_range().never();
        let start = body.translation();
        let outcome = body.update_movable_object([&blocker], &bounds);
        assert_eq!(outcome, MoveOutcome::Collided);
        assert_eq!(body.translation(), start);
    }

    #[test]
    fn out_of_range_keeps_exact_position() {
        let mut body = walker(Vec3::new(123.456, 7.25, 987.654));
        body.set_yaw(0.3);
        let mut bounds = MockMovementBounds::new();
        bounds.expect_within_range().times(1).return_const(false);
        let start = body.translation();
        let outcome = body.update_movable_object([], &bounds);
        assert_eq!(outcome, MoveOutcome::OutOfRange);
        assert_eq!(body.translation().to_array(), start.to_array());
    }

    #[test]
    fn touching_spheres_collide() {
        let body = walker(Vec3::new(100.0, 0.0, 100.0));
        let other = walker(Vec3::new(100.0, 0.0, 120.0));
        assert!(body.collides_at(Vec3::new(100.0, 0.0, 100.0), [&other]));
        assert!(!body.collides_at(Vec3::new(100.0, 0.0, 99.5), [&other]));
    }

    #[test]
    fn scaled_radius_uses_largest_scale() {
        let body = Body::with_scales(
            "rock",
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::Y,
            0.0,
            Vec3::new(2.0, 5.0, 3.0),
            4.0,
        );
        assert_eq!(body.bounding_radius(), 20.0);
        assert_eq!(body.step_size(), SCALED_STEP_SIZE);
    }

    #[test]
    fn bounding_sphere_follows_translation() {
        let mut body = walker(Vec3::new(10.0, 0.0, 10.0));
        body.set_translation(Vec3::new(30.0, 5.0, 40.0));
        assert_eq!(body.bounding_center(), Vec3::new(10.0, 0.0, 10.0));
        body.update_bounding_sphere();
        assert_eq!(body.bounding_center(), Vec3::new(30.0, 5.0, 40.0));
        let world = body.bounding_world();
        assert_eq!(world.w_axis.truncate(), Vec3::new(30.0, 5.0, 40.0));
        assert_eq!(world.x_axis.x, 10.0);
    }

    #[test]
    fn turn_to_face_points_forward_at_target() {
        let mut body = walker(Vec3::new(100.0, 0.0, 100.0));
        let rotation = body
            .turn_to_face(Vec3::new(200.0, 40.0, 100.0))
            .expect("valid rotation");
        assert_relative_eq!(rotation.angle, 3.0 * FRAC_PI_2, epsilon = 1e-5);
        assert_relative_eq!(rotation.axis.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(body.forward().x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(body.forward().z, 0.0, epsilon = 1e-5);
        assert_eq!(body.up(), Vec3::Y);
        assert_eq!(body.translation(), Vec3::new(100.0, 0.0, 100.0));
    }

    #[test]
    fn turn_to_face_target_behind_turns_about_up() {
        let mut body = walker(Vec3::new(100.0, 0.0, 100.0));
        let rotation = body
            .turn_to_face(Vec3::new(100.0, 0.0, 300.0))
            .expect("valid rotation");
        assert_relative_eq!(rotation.angle, PI, epsilon = 1e-5);
        assert_relative_eq!(rotation.axis.y.abs(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(body.forward().z, 1.0, epsilon = 1e-5);
        assert_relative_eq!(body.forward().x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn turn_to_face_own_position_is_rejected() {
        let mut body = walker(Vec3::new(100.0, 0.0, 100.0));
        let before = body.orientation();
        let err = body
            .turn_to_face(Vec3::new(100.0, 50.0, 100.0))
            .expect_err("no direction to face");
        assert_eq!(err, FacingError::NanAngle);
        assert_eq!(body.orientation(), before);
    }

    #[test]
    fn rotation_formats_for_inspector() {
        let rotation = Rotation {
            angle: 1.5,
            axis: Vec3::Y,
        };
        assert_eq!(
            rotation.to_string(),
            "radian to rotate =  1.50, axis for rotation ( 0.00,  1.00,  0.00)"
        );
    }
}
