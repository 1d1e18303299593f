//! Leaf traversal for debug visualization and statistics.
//!
//! The tree stores records only for refined regions, so leaves are implicit:
//! every unset bit of a record is a free leaf one level down, and every set
//! bit of a finest-level record is an occupied cell.

use smallvec::SmallVec;

use super::locate::{Cursor, Step};
use super::{NavOctree, NodeInfo, NodeKind};
use crate::constants::{MAX_DEPTH, OCTANT_COUNT};

/// Leaf totals per level (index = level).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeafCounts {
  pub free: [u32; MAX_DEPTH as usize + 1],
  pub occupied: [u32; MAX_DEPTH as usize + 1],
}

impl LeafCounts {
  pub fn total_free(&self) -> u32 {
    self.free.iter().sum()
  }

  pub fn total_occupied(&self) -> u32 {
    self.occupied.iter().sum()
  }
}

impl NavOctree {
  /// Visit every leaf with its world width, depth first.
  ///
  /// Does nothing on an unbuilt tree.
  pub fn visit_leaves<F>(&self, mut visit: F)
  where
    F: FnMut(&NodeInfo, i32),
  {
    if !self.is_built() {
      return;
    }

    let mut stack: SmallVec<[Cursor; 32]> = SmallVec::new();
    stack.push(Cursor::root(self.config().origin));

    while let Some(at) = stack.pop() {
      for octant in 0..OCTANT_COUNT as u8 {
        match self.step(&at, octant) {
          Step::Leaf(leaf) => visit(&leaf, self.config().node_width(leaf.level)),
          Step::Branch(next) => stack.push(next),
        }
      }
    }
  }

  /// Count free and occupied leaves per level.
  pub fn leaf_counts(&self) -> LeafCounts {
    let mut counts = LeafCounts::default();
    self.visit_leaves(|leaf, _| match leaf.kind {
      NodeKind::Free => counts.free[leaf.level as usize] += 1,
      NodeKind::Occupied => counts.occupied[leaf.level as usize] += 1,
      NodeKind::Refined => {}
    });
    counts
  }
}

#[cfg(test)]
#[path = "leaves_test.rs"]
mod leaves_test;
