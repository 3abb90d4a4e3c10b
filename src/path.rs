//! Ordered waypoint sequences and their traversal policies.
//!
//! A [`Path`] hands out its nodes one at a time through
//! [`Path::next_node`]. What happens at the last node depends on the
//! [`PathPolicy`]:
//!
//! - [`PathPolicy::Single`] keeps returning the last node and marks the path
//!   done.
//! - [`PathPolicy::Reverse`] reverses the node order and carries on from the
//!   new front, so traversal bounces between the two ends.
//! - [`PathPolicy::Loop`] returns the last node and restarts from the first.

use std::fmt;
use std::num::ParseIntError;
use std::path::{Path as FsPath, PathBuf};
use std::str::FromStr;

use glam::Vec3;
use log::debug;
use thiserror::Error;

use crate::nav_node::{NavNode, NavNodeKind};
use crate::terrain::HeightField;

/// What a [`Path`] does after handing out its last node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathPolicy {
    /// Stop at the end.
    #[default]
    Single,
    /// Bounce by reversing the node order.
    Reverse,
    /// Restart from the first node.
    Loop,
}

impl fmt::Display for PathPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Single => "single",
            Self::Reverse => "reverse",
            Self::Loop => "loop",
        };
        f.write_str(name)
    }
}

/// Unrecognised [`PathPolicy`] name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown path policy {0:?}, expected single, reverse or loop")]
pub struct UnknownPolicy(pub String);

impl FromStr for PathPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "reverse" => Ok(Self::Reverse),
            "loop" => Ok(Self::Loop),
            _ => Err(UnknownPolicy(s.to_owned())),
        }
    }
}

/// Failure while building a [`Path`] from waypoint text.
#[derive(Debug, Error)]
pub enum PathFileError {
    /// The waypoint file could not be read.
    #[error("failed to read path file {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A line holds fewer than two coordinates.
    #[error("line {line}: expected `X Z`, found {content:?}")]
    MissingCoordinate {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },
    /// A coordinate is not an integer.
    #[error("line {line}: invalid coordinate {token:?}: {source}")]
    InvalidCoordinate {
        /// 1-based line number.
        line: usize,
        /// The token that failed to parse.
        token: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// Waypoints with a traversal cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    nodes: Vec<NavNode>,
    cursor: usize,
    policy: PathPolicy,
    done: bool,
}

impl Path {
    /// Creates a path over `nodes`.
    #[must_use]
    pub const fn new(nodes: Vec<NavNode>, policy: PathPolicy) -> Self {
        Self {
            nodes,
            cursor: 0,
            policy,
            done: false,
        }
    }

    /// Parses waypoint text: one `X Z` integer pair per line.
    ///
    /// Blank lines are skipped and tokens after the second are ignored. Nodes
    /// are [`NavNodeKind::Waypoint`]s at ground level zero.
    ///
    /// # Errors
    /// Returns [`PathFileError::MissingCoordinate`] or
    /// [`PathFileError::InvalidCoordinate`] naming the first bad line.
    ///
    /// # Examples
    /// ```
    /// use trek::{Path, PathPolicy};
    /// let path = Path::parse("100 200\n300 400\n", PathPolicy::Loop).unwrap();
    /// assert_eq!(path.len(), 2);
    /// ```
    pub fn parse(text: &str, policy: PathPolicy) -> Result<Self, PathFileError> {
        Self::parse_with(text, policy, |_, _| 0.0)
    }

    /// Parses waypoint text, placing each node on the terrain surface.
    ///
    /// # Errors
    /// As [`Self::parse`].
    pub fn parse_on(
        text: &str,
        policy: PathPolicy,
        terrain: &HeightField,
    ) -> Result<Self, PathFileError> {
        Self::parse_with(text, policy, |x, z| terrain.surface_height(x, z))
    }

    /// Reads a waypoint file; see [`Self::parse`] for the format.
    ///
    /// # Errors
    /// Returns [`PathFileError::Io`] when the file cannot be read, or a parse
    /// error for its first bad line.
    pub fn load(file: impl AsRef<FsPath>, policy: PathPolicy) -> Result<Self, PathFileError> {
        let text = read_waypoints(file.as_ref())?;
        Self::parse(&text, policy)
    }

    /// Reads a waypoint file and places each node on the terrain surface.
    ///
    /// # Errors
    /// As [`Self::load`].
    pub fn load_on(
        file: impl AsRef<FsPath>,
        policy: PathPolicy,
        terrain: &HeightField,
    ) -> Result<Self, PathFileError> {
        let text = read_waypoints(file.as_ref())?;
        Self::parse_on(&text, policy, terrain)
    }

    fn parse_with<F>(text: &str, policy: PathPolicy, ground: F) -> Result<Self, PathFileError>
    where
        F: Fn(f32, f32) -> f32,
    {
        let mut nodes = Vec::new();
        for (index, content) in text.lines().enumerate() {
            let line = index + 1;
            let mut tokens = content.split_whitespace();
            let Some(first) = tokens.next() else {
                continue;
            };
            let Some(second) = tokens.next() else {
                return Err(PathFileError::MissingCoordinate {
                    line,
                    content: content.to_owned(),
                });
            };
            let x = parse_coordinate(line, first)?;
            let z = parse_coordinate(line, second)?;
            let position = Vec3::new(x, ground(x, z), z);
            nodes.push(NavNode::with_kind(position, NavNodeKind::Waypoint));
        }
        debug!("parsed {} waypoints for a {policy} path", nodes.len());
        Ok(Self::new(nodes, policy))
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` for a path without nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in their current order.
    #[must_use]
    pub fn nodes(&self) -> &[NavNode] {
        &self.nodes
    }

    /// Index of the node the next call hands out.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Traversal policy.
    #[must_use]
    pub const fn policy(&self) -> PathPolicy {
        self.policy
    }

    /// `true` once a [`PathPolicy::Single`] path has handed out its last
    /// node.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Hands out the node at the cursor and advances it per the policy.
    ///
    /// Returns `None` only for an empty path.
    pub fn next_node(&mut self) -> Option<&NavNode> {
        let last = self.nodes.len().checked_sub(1)?;
        let index = if self.cursor < last {
            self.cursor += 1;
            self.cursor - 1
        } else {
            match self.policy {
                PathPolicy::Single => {
                    self.done = true;
                    last
                }
                PathPolicy::Reverse => {
                    self.nodes.reverse();
                    self.cursor = 1.min(last);
                    0
                }
                PathPolicy::Loop => {
                    self.cursor = 0;
                    last
                }
            }
        };
        self.nodes.get(index)
    }
}

fn read_waypoints(path: &FsPath) -> Result<String, PathFileError> {
    std::fs::read_to_string(path).map_err(|source| PathFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[expect(
    clippy::cast_precision_loss,
    reason = "Waypoint coordinates are terrain-sized integers."
)]
fn parse_coordinate(line: usize, token: &str) -> Result<f32, PathFileError> {
    token
        .parse::<i32>()
        .map(|value| value as f32)
        .map_err(|source| PathFileError::InvalidCoordinate {
            line,
            token: token.to_owned(),
            source,
        })
}
