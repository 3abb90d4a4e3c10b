#![cfg_attr(docsrs, feature(doc_cfg))]
//! Terrain-following agent navigation.
//!
//! A [`Stage`] holds a [`HeightField`], the bodies standing on it and the
//! agents moving them. Each tick every agent turns and steps its body;
//! moves that would overlap another collidable body or leave the playable
//! range are rejected, and every body is kept on the terrain surface.
//!
//! ```
//! use glam::Vec3;
//! use trek::{Body, HeightField, MovementIntent, Stage, StageConfig};
//!
//! let terrain = HeightField::from_heights(16, 100.0, vec![0; 256]).unwrap();
//! let mut stage = Stage::new(StageConfig::default(), terrain);
//! let wanderer = stage.spawn_wanderer(
//!     Body::new("dog", Vec3::new(800.0, 0.0, 800.0), Vec3::Y, 0.0, 10.0),
//!     7,
//! );
//! stage.tick(MovementIntent::default());
//! assert!(stage.body(wanderer).is_some());
//! ```
pub mod agent;
pub mod body;
pub mod bounds;
pub mod config;
pub mod constants;
pub mod inspector;
pub mod intent;
pub mod logging;
pub mod nav_node;
pub mod numeric;
pub mod path;
pub mod registry;
pub mod stage;
pub mod terrain;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use agent::{Agent, Behaviour, PathFollower, PlayerControl, TickContext, Wander};
pub use body::{Body, FacingError, MoveOutcome, Rotation};
pub use bounds::{MovementBounds, StageBounds};
pub use config::{ConfigError, StageConfig};
pub use inspector::Inspector;
pub use intent::{MovementIntent, Stride, Turn};
pub use logging::init as init_logging;
pub use nav_node::{NavNode, NavNodeKind};
pub use path::{Path, PathFileError, PathPolicy, UnknownPolicy};
pub use registry::{BodyId, CollidableRegistry};
pub use stage::Stage;
pub use terrain::{HeightField, TerrainError};
pub use vector_math::horizontal_distance;
