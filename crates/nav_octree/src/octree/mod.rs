//! Octree module: sparse occupancy index over a cubic world region.
//!
//! The tree is stored as one flat array of fixed-size [`Node`] records.
//! Records exist only for the root and for occupied regions; free space is
//! implicit in the unset bits of a parent's children mask, so a large empty
//! area costs nothing beyond one bit.
//!
//! # Level Convention
//!
//! Level 0 = root (coarsest), level `depth` = finest cells.
//!
//! ```text
//! Node Width = scale * 2^(depth - level)
//! ```
//!
//! # Module Structure
//!
//! - [`config`]: `NavConfig` - depth, scale, origin and coordinate math
//! - [`address`]: `Address` - packed root-to-region octant path
//! - [`node`]: `Node` records and `NodeInfo` query results
//! - [`build`]: recursive construction and compaction
//! - `locate`: position and address lookups
//! - `neighbours`: face adjacency across regions of different sizes
//! - [`leaves`]: leaf traversal for debugging

pub mod address;
pub mod bounds;
pub mod build;
pub mod config;
pub mod leaves;
mod locate;
mod neighbours;
pub mod node;
mod tree;

// Re-exports
pub use address::Address;
pub use bounds::DAabb3;
pub use build::BuildStats;
pub use config::NavConfig;
pub use leaves::LeafCounts;
pub use node::{manhattan, Node, NodeInfo, NodeKind};
pub use tree::NavOctree;
