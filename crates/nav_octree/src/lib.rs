//! nav_octree - sparse occupancy octree for 3D navigation
//!
//! This crate builds a hierarchical occupancy index over a cubic world region
//! from an external collision query, then answers point location, face
//! adjacency and path search queries against it. Free space is never
//! subdivided, so large open areas collapse into a handful of coarse regions
//! and searches cross them in a single step.
//!
//! # Features
//!
//! - **Compact storage**: one flat array of 8-byte records, free space costs
//!   one bit in the parent's mask
//! - **Mixed-size adjacency**: neighbours are resolved across regions of
//!   different sizes in both directions
//! - **A\* search** over free regions with a consistent Manhattan heuristic,
//!   optional expansion and time limits, and parallel batches on rayon
//! - **Background rebuilds** published by swapping an `Arc`
//!
//! # Example
//!
//! ```ignore
//! use glam::DVec3;
//! use nav_octree::{NavConfig, NavOctree, ObstacleField};
//!
//! let field = ObstacleField::new().with_sphere(DVec3::new(5.0, 5.0, 0.0), 1.0);
//! let (tree, stats) = NavOctree::build_new(NavConfig::new(8, 64), &field)?;
//!
//! assert!(tree.find(DVec3::new(5.0, 5.0, 0.0)).is_some());
//!
//! let path = tree.find_path(DVec3::new(-500.0, 0.0, 0.0), DVec3::new(500.0, 0.0, 0.0))?;
//! for waypoint in path.waypoints() {
//!     println!("{waypoint}");
//! }
//! ```

pub mod constants;
pub mod error;
pub mod tester;

pub use error::{ConfigError, PathError};
pub use tester::{EmptySpace, ObstacleField, OccupancyTester, Sphere};

// Tree storage, construction, location and adjacency
pub mod octree;
pub use octree::{Address, BuildStats, DAabb3, LeafCounts, NavConfig, NavOctree, NodeInfo, NodeKind};

// Path search
pub mod search;
pub use search::{Path, PathCompletion, PathQueue, SearchLimits};

// Background builds and per-world state
pub mod rebuild;
pub use rebuild::{AsyncRebuild, RebuildRequest, RebuildResult};

pub mod world;
pub use world::{NavWorld, WorldId};

// Engine-agnostic metrics collection
pub mod metrics;

#[cfg(test)]
pub(crate) mod test_utils;
