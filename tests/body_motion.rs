//! Stepping, collision rejection and turning for individual bodies.
use approx::assert_relative_eq;
use glam::Vec3;
use rstest::rstest;
use test_utils::fixtures::body_at;
use trek::vector_math::flatten;
use trek::{Body, CollidableRegistry, MoveOutcome, StageBounds};

fn open_range() -> StageBounds {
    StageBounds::new(100.0, 10_000.0)
}

#[rstest]
#[case::touching(20.0, true)]
#[case::just_apart(20.01, false)]
#[case::overlapping(5.0, true)]
fn collision_boundary_is_inclusive(#[case] gap: f32, #[case] collides: bool) {
    let body = body_at("a", 500.0, 500.0);
    let other = body_at("b", 500.0 + gap, 500.0);
    assert_eq!(body.collides_at(body.translation(), [&other]), collides);
}

#[test]
fn blocked_step_leaves_position_bit_identical() {
    let mut registry = CollidableRegistry::new();
    let mover = registry.insert(
        Body::new("mover", Vec3::new(733.3, 12.7, 911.1), Vec3::Y, 0.4, 10.0),
        true,
    );
    let start = registry.get(mover).expect("mover").translation();
    let forward = registry.get(mover).expect("mover").forward();
    registry.insert(
        Body::new("wall", start + forward * 48.0, Vec3::Y, 0.0, 10.0),
        true,
    );

    let outcome = registry.update_body(mover, &open_range());

    assert_eq!(outcome, Some(MoveOutcome::Collided));
    let after = registry.get(mover).expect("mover").translation();
    assert_eq!(after.to_array().map(f32::to_bits), start.to_array().map(f32::to_bits));
}

#[test]
fn range_rejection_keeps_the_turn() {
    let mut body = body_at("edge", 500.0, 120.0);
    body.set_yaw(0.2);
    let outcome = body.update_movable_object([], &StageBounds::new(100.0, 3_000.0));
    assert_eq!(outcome, MoveOutcome::OutOfRange);
    assert_eq!(body.translation(), Vec3::new(500.0, 0.0, 120.0));
    assert!(body.forward().x < 0.0, "rotation still applies");
}

#[test]
fn backward_steps_walk_along_plus_z() {
    let mut body = body_at("reverse", 500.0, 500.0);
    body.set_step(-2);
    assert_eq!(body.update_movable_object([], &open_range()), MoveOutcome::Moved);
    assert_relative_eq!(body.translation().z, 596.0, epsilon = 1e-4);
}

#[test]
fn scaled_bodies_take_short_steps() {
    let mut body = Body::with_scales(
        "pup",
        Vec3::new(500.0, 0.0, 500.0),
        Vec3::Y,
        0.0,
        Vec3::ONE,
        10.0,
    );
    body.update_movable_object([], &open_range());
    assert_relative_eq!(body.translation().z, 490.0, epsilon = 1e-4);
}

#[rstest]
#[case::east(Vec3::new(900.0, 0.0, 500.0))]
#[case::north_west(Vec3::new(200.0, 30.0, 150.0))]
#[case::south(Vec3::new(510.0, -8.0, 950.0))]
#[case::behind(Vec3::new(500.0, 0.0, 900.0))]
fn turned_body_faces_its_target(#[case] target: Vec3) {
    let mut body = body_at("looker", 500.0, 500.0);
    body.turn_to_face(target).expect("target is off the body");

    let toward = (flatten(target) - flatten(body.translation())).normalize();
    let forward = flatten(body.forward()).normalize();
    assert_relative_eq!(forward.dot(toward), 1.0, epsilon = 1e-3);
    assert_eq!(body.up(), Vec3::Y);
    assert_eq!(body.translation(), Vec3::new(500.0, 0.0, 500.0));
}

#[test]
fn bounding_sphere_tracks_each_committed_move() {
    let mut body = body_at("sphere", 500.0, 500.0);
    body.update_movable_object([], &open_range());
    assert_eq!(body.bounding_center(), Vec3::new(500.0, 0.0, 500.0));
    body.update_bounding_sphere();
    assert_eq!(body.bounding_center(), body.translation());
    assert_eq!(body.bounding_world().w_axis.truncate(), body.translation());
}
