//! Error types.
//!
//! Configuration problems are fatal and surface when a tree is created.
//! Path search failures are ordinary outcomes and carry how much of the graph
//! was explored before giving up.

use thiserror::Error;

/// Invalid depth/scale combination. A tree is never created from one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
  #[error("depth {depth} is outside 1..={max}")]
  DepthOutOfRange { depth: u8, max: u8 },

  #[error("node width {width} at level {level} is below the minimum of {min}")]
  NodeTooSmall { level: u8, width: i64, min: i32 },

  /// Stricter than the width floor alone: an odd scale of 5 or more has
  /// wide enough cells, but its quarter-width child offsets would not land on
  /// integer centers.
  #[error("scale {scale} must be even so child centers stay on the integer lattice")]
  OddScale { scale: i32 },

  #[error("root extent {extent} around origin {origin:?} does not fit the i32 lattice")]
  ExtentOverflow { extent: i64, origin: [i32; 3] },
}

/// Why a path search produced no route.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
  #[error("tree has not been built")]
  NotBuilt,

  #[error("start position is outside the tree")]
  StartOutOfBounds,

  #[error("goal position is outside the tree")]
  GoalOutOfBounds,

  #[error("start position is inside an occupied cell")]
  StartBlocked,

  #[error("goal position is inside an occupied cell")]
  GoalBlocked,

  #[error("goal unreachable after expanding {expanded} nodes")]
  Unreachable { expanded: usize },

  #[error("search limit hit after expanding {expanded} nodes")]
  LimitExceeded { expanded: usize },
}
