//! Path search over a built [`NavOctree`](crate::octree::NavOctree).
//!
//! - `astar`: single searches (`find_path`, `find_path_with`) and [`Path`]
//! - [`limits`]: expansion and time caps
//! - [`queue`]: batched searches resolved in parallel

mod astar;
pub mod limits;
pub mod queue;

pub use astar::Path;
pub use limits::SearchLimits;
pub use queue::{PathCompletion, PathQueue, PathRequest};
