//! NavConfig - tree dimensions and world coordinate mapping.
//!
//! # Level Convention
//!
//! Level 0 is the root cube, deeper levels are finer. Level `depth` is the
//! finest cell size and never has a node record of its own.
//!
//! ```text
//! Node Width = scale * 2^(depth - level)
//! ```

use glam::IVec3;

use super::DAabb3;
use crate::constants::{MAX_DEPTH, MIN_NODE_WIDTH, OCTANT_SIGNS};
use crate::error::ConfigError;

/// Dimensions of a navigation tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavConfig {
  /// Number of subdivision levels below the root (1..=16).
  pub depth: u8,

  /// Width of the finest cells in world units.
  pub scale: i32,

  /// World-space center of the root cube.
  pub origin: IVec3,
}

impl NavConfig {
  /// Create a config centered on the world origin.
  pub fn new(depth: u8, scale: i32) -> Self {
    Self {
      depth,
      scale,
      origin: IVec3::ZERO,
    }
  }

  /// Move the root cube so it is centered on `origin`.
  pub fn with_origin(mut self, origin: IVec3) -> Self {
    self.origin = origin;
    self
  }

  /// Check that every level of the tree has a usable integer geometry.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.depth == 0 || self.depth > MAX_DEPTH {
      return Err(ConfigError::DepthOutOfRange {
        depth: self.depth,
        max: MAX_DEPTH,
      });
    }

    // Widths shrink with level, the finest one is the binding constraint
    // but the error names the first level that breaks.
    for level in 0..=self.depth {
      let width = (self.scale as i64) << (self.depth - level);
      if width < MIN_NODE_WIDTH as i64 {
        return Err(ConfigError::NodeTooSmall {
          level,
          width,
          min: MIN_NODE_WIDTH,
        });
      }
    }

    if self.scale % 2 != 0 {
      return Err(ConfigError::OddScale { scale: self.scale });
    }

    let extent = (self.scale as i64) << self.depth;
    let half = extent / 2;
    let fits = |c: i32| {
      let c = c as i64;
      c - half >= i32::MIN as i64 && c + half <= i32::MAX as i64
    };
    if extent > i32::MAX as i64
      || !fits(self.origin.x)
      || !fits(self.origin.y)
      || !fits(self.origin.z)
    {
      return Err(ConfigError::ExtentOverflow {
        extent,
        origin: self.origin.to_array(),
      });
    }

    Ok(())
  }

  /// Edge length of a region at `level`.
  #[inline]
  pub fn node_width(&self, level: u8) -> i32 {
    debug_assert!(level <= self.depth, "level {} beyond depth {}", level, self.depth);
    self.scale << (self.depth - level)
  }

  /// Edge length of the root cube.
  #[inline]
  pub fn root_width(&self) -> i32 {
    self.node_width(0)
  }

  /// Bounds of the whole tree.
  #[inline]
  pub fn root_bounds(&self) -> DAabb3 {
    DAabb3::from_cube(self.origin, self.root_width())
  }

  /// Bounds of the region centered at `center` on `level`.
  #[inline]
  pub fn region_bounds(&self, center: IVec3, level: u8) -> DAabb3 {
    DAabb3::from_cube(center, self.node_width(level))
  }

  /// Center of `octant` inside the region centered at `center` on `level`.
  #[inline]
  pub fn child_center(&self, center: IVec3, level: u8, octant: u8) -> IVec3 {
    center + OCTANT_SIGNS[octant as usize] * (self.node_width(level) / 4)
  }
}

impl Default for NavConfig {
  fn default() -> Self {
    Self::new(8, 64)
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
