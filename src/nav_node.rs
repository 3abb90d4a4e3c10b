//! Navigation markers used as path waypoints and search bookkeeping.

use std::cmp::Ordering;

use glam::Vec3;
use ordered_float::OrderedFloat;

/// Role a [`NavNode`] currently plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavNodeKind {
    /// A terrain vertex.
    #[default]
    GridVertex,
    /// A node to follow along a path.
    Waypoint,
    /// A node in a search's open or closed set.
    SearchFrontier,
    /// A node on a path produced by a search.
    ResolvedPath,
}

impl NavNodeKind {
    /// Marker color associated with the kind, as linear RGB.
    #[must_use]
    pub const fn display_color(self) -> Vec3 {
        match self {
            Self::GridVertex => Vec3::new(1.0, 1.0, 0.0),
            Self::Waypoint => Vec3::new(1.0, 0.0, 0.0),
            Self::SearchFrontier => Vec3::new(0.0, 0.0, 1.0),
            Self::ResolvedPath => Vec3::ONE,
        }
    }
}

/// A fixed world position with a mutable classification and a distance key.
#[derive(Debug, Clone, PartialEq)]
pub struct NavNode {
    position: Vec3,
    kind: NavNodeKind,
    distance: OrderedFloat<f64>,
}

impl NavNode {
    /// Creates a [`NavNodeKind::GridVertex`] node.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self::with_kind(position, NavNodeKind::default())
    }

    /// Creates a node of the given kind.
    #[must_use]
    pub fn with_kind(position: Vec3, kind: NavNodeKind) -> Self {
        Self {
            position,
            kind,
            distance: OrderedFloat(0.0),
        }
    }

    /// World position. Fixed for the node's lifetime.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Current classification.
    #[must_use]
    pub const fn kind(&self) -> NavNodeKind {
        self.kind
    }

    /// Reclassifies the node.
    pub fn set_kind(&mut self, kind: NavNodeKind) {
        self.kind = kind;
    }

    /// Marker color for the current kind.
    #[must_use]
    pub const fn display_color(&self) -> Vec3 {
        self.kind.display_color()
    }

    /// Ordering key for priority queues.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance.into_inner()
    }

    /// Updates the ordering key.
    pub fn set_distance(&mut self, distance: f64) {
        self.distance = OrderedFloat(distance);
    }

    /// Orders nodes by ascending distance; equal distances compare equal.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use trek::NavNode;
    /// let mut near = NavNode::new(Vec3::ZERO);
    /// let mut far = NavNode::new(Vec3::X);
    /// near.set_distance(1.0);
    /// far.set_distance(4.0);
    /// let mut nodes = vec![far, near];
    /// nodes.sort_by(NavNode::cmp_by_distance);
    /// assert_eq!(nodes[0].distance(), 1.0);
    /// ```
    #[must_use]
    pub fn cmp_by_distance(&self, other: &Self) -> Ordering {
        self.distance.cmp(&other.distance)
    }
}
