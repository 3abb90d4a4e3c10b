//! Traversal order and file loading for waypoint paths.
use std::io::Write;

use glam::Vec3;
use rstest::rstest;
use tempfile::NamedTempFile;
use test_utils::fixtures::{flat_field, path_through, ramp_field};
use trek::{NavNode, NavNodeKind, Path, PathFileError, PathPolicy};

const A: (f32, f32) = (100.0, 100.0);
const B: (f32, f32) = (200.0, 100.0);
const C: (f32, f32) = (300.0, 100.0);

fn visit(path: &mut Path, calls: usize) -> Vec<(f32, f32, bool)> {
    (0..calls)
        .map(|_| {
            let node = path.next_node().map(NavNode::position).expect("non-empty path");
            (node.x, node.z, path.is_done())
        })
        .collect()
}

#[rstest]
#[case::single(
    PathPolicy::Single,
    vec![(A, false), (B, false), (C, true), (C, true)]
)]
#[case::reverse(
    PathPolicy::Reverse,
    vec![(A, false), (B, false), (C, false), (B, false), (A, false), (B, false)]
)]
#[case::looped(
    PathPolicy::Loop,
    vec![(A, false), (B, false), (C, false), (A, false)]
)]
fn policies_visit_nodes_in_order(
    #[case] policy: PathPolicy,
    #[case] expected: Vec<((f32, f32), bool)>,
) {
    let mut path = path_through(&[A, B, C], policy);
    let visited = visit(&mut path, expected.len());
    let expected: Vec<_> = expected
        .into_iter()
        .map(|((x, z), done)| (x, z, done))
        .collect();
    assert_eq!(visited, expected);
    assert!(path.cursor() < path.len());
}

#[test]
fn single_stays_done_and_idempotent() {
    let mut path = path_through(&[A, B], PathPolicy::Single);
    visit(&mut path, 2);
    let cursor = path.cursor();
    for _ in 0..5 {
        let node = path.next_node().map(NavNode::position);
        assert_eq!(node, Some(Vec3::new(B.0, 0.0, B.1)));
        assert!(path.is_done());
        assert_eq!(path.cursor(), cursor);
    }
}

#[test]
fn reverse_never_reports_done() {
    let mut path = path_through(&[A, B, C], PathPolicy::Reverse);
    assert!(visit(&mut path, 20).iter().all(|(_, _, done)| !done));
}

fn waypoint_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write waypoints");
    file
}

#[test]
fn load_reads_waypoints_at_ground_zero() {
    let file = waypoint_file("100 200\n\n300 400 ignored\n");
    let path = Path::load(file.path(), PathPolicy::Loop).expect("valid file");
    let positions: Vec<Vec3> = path.nodes().iter().map(NavNode::position).collect();
    assert_eq!(
        positions,
        vec![Vec3::new(100.0, 0.0, 200.0), Vec3::new(300.0, 0.0, 400.0)]
    );
    assert!(path
        .nodes()
        .iter()
        .all(|node| node.kind() == NavNodeKind::Waypoint));
    assert_eq!(path.policy(), PathPolicy::Loop);
}

#[test]
fn load_on_places_waypoints_on_the_terrain() {
    let file = waypoint_file("12 13\n5 5\n");
    let path = Path::load_on(file.path(), PathPolicy::Single, &ramp_field(4, 10.0))
        .expect("valid file");
    let heights: Vec<f32> = path.nodes().iter().map(|node| node.position().y).collect();
    let [near, far] = heights.as_slice() else {
        panic!("expected two waypoints, got {heights:?}");
    };
    approx::assert_relative_eq!(*near, 142.0, epsilon = 1e-3);
    approx::assert_relative_eq!(*far, 55.0, epsilon = 1e-3);
}

#[test]
fn load_on_outside_the_terrain_uses_zero() {
    let file = waypoint_file("5000 5000\n");
    let path = Path::load_on(file.path(), PathPolicy::Single, &flat_field(4, 10.0, 9))
        .expect("valid file");
    assert_eq!(path.nodes().first().map(|n| n.position().y), Some(0.0));
}

#[rstest]
#[case("1 2\nthree 4\n", 2)]
#[case("1 2\n3 4\n5\n", 3)]
#[case("x\n", 1)]
fn malformed_lines_name_their_line_number(#[case] contents: &str, #[case] line: usize) {
    let file = waypoint_file(contents);
    let err = Path::load(file.path(), PathPolicy::Single).expect_err("malformed file");
    let reported = match &err {
        PathFileError::InvalidCoordinate { line, .. }
        | PathFileError::MissingCoordinate { line, .. } => *line,
        PathFileError::Io { .. } => panic!("unexpected I/O error: {err}"),
    };
    assert_eq!(reported, line);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("no-such-path.txt");
    let err = Path::load(&missing, PathPolicy::Single).expect_err("missing file");
    assert!(matches!(err, PathFileError::Io { ref path, .. } if path == &missing));
}
