//! Tree construction: recursive occupancy refinement into per-level buffers,
//! then compaction into one address-stable array.
//!
//! # Phases
//!
//! 1. **Refine**: starting at the root, test all eight octants of a node. A
//!    node with any occupied octant (above the finest record level) gets a
//!    block of eight slots in the next level's buffer and the builder recurses
//!    into each occupied octant. `offset` is relative to that level's buffer.
//! 2. **Optimize**: concatenate the buffers root level first and rewrite each
//!    `offset` to an absolute index by adding the size of every level placed
//!    before the child level.
//!
//! ```text
//!  level 0   [R]                       offsets: R -> 0 (level 1)
//!  level 1   [a b c d e f g h]                  c -> 0, f -> 8 (level 2)
//!  level 2   [........ ........]
//!
//!  final     [R | a b c d e f g h | ........ ........]
//!                                    c -> 9, f -> 17
//! ```

use glam::IVec3;
use smallvec::SmallVec;
use web_time::Instant;

use super::{NavConfig, Node};
use crate::constants::{MAX_DEPTH, MIN_NODE_WIDTH, OCTANT_COUNT};
use crate::tester::OccupancyTester;

/// Statistics from one build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
  /// Size of each per-level buffer before compaction (index = level).
  pub nodes_per_level: SmallVec<[usize; MAX_DEPTH as usize]>,
  /// Size of the finalized array.
  pub total_nodes: usize,
  /// Number of occupancy queries issued.
  pub tester_queries: usize,
  /// Wall time of the build in microseconds.
  pub build_us: u64,
}

/// Single-use builder holding the temporary per-level buffers.
pub(crate) struct TreeBuilder<'a, T: OccupancyTester + ?Sized> {
  config: &'a NavConfig,
  tester: &'a T,
  levels: Vec<Vec<Node>>,
  queries: usize,
}

impl<'a, T: OccupancyTester + ?Sized> TreeBuilder<'a, T> {
  pub(crate) fn new(config: &'a NavConfig, tester: &'a T) -> Self {
    let mut levels = vec![Vec::new(); config.depth as usize];
    levels[0].push(Node::EMPTY);
    Self {
      config,
      tester,
      levels,
      queries: 0,
    }
  }

  /// Run both phases, consuming the builder.
  pub(crate) fn run(mut self) -> (Vec<Node>, BuildStats) {
    let start = Instant::now();

    self.refine(0, 0, self.config.origin);

    let nodes_per_level: SmallVec<[usize; MAX_DEPTH as usize]> =
      self.levels.iter().map(Vec::len).collect();
    let queries = self.queries;
    let nodes = self.optimize();

    debug_assert_eq!(nodes.len(), nodes_per_level.iter().sum::<usize>());

    let stats = BuildStats {
      nodes_per_level,
      total_nodes: nodes.len(),
      tester_queries: queries,
      build_us: start.elapsed().as_micros() as u64,
    };
    (nodes, stats)
  }

  /// Reserve eight empty slots in `level`'s buffer, returning the first.
  fn allocate(&mut self, level: usize) -> u32 {
    let buffer = &mut self.levels[level];
    let first = buffer.len();
    buffer.resize(first + OCTANT_COUNT, Node::EMPTY);
    first as u32
  }

  /// Test and refine the node stored at `levels[level][index]`.
  fn refine(&mut self, level: u8, index: usize, center: IVec3) {
    let width = self.config.node_width(level);
    debug_assert!(width >= MIN_NODE_WIDTH);
    let half_child = width / 4;

    let mut children = 0u8;
    for octant in 0..OCTANT_COUNT as u8 {
      let child_center = self.config.child_center(center, level, octant);
      self.queries += 1;
      if self.tester.contact_test_box(child_center, half_child) {
        children |= 1 << octant;
      }
    }
    self.levels[level as usize][index].children = children;

    let child_level = level + 1;
    if children == 0 || child_level >= self.config.depth {
      return;
    }

    let offset = self.allocate(child_level as usize);
    self.levels[level as usize][index].offset = offset;

    for octant in 0..OCTANT_COUNT as u8 {
      if children & (1 << octant) != 0 {
        let child_center = self.config.child_center(center, level, octant);
        self.refine(child_level, (offset + octant as u32) as usize, child_center);
      }
    }
  }

  /// Flatten the per-level buffers into one array with absolute offsets.
  fn optimize(&mut self) -> Vec<Node> {
    let levels = std::mem::take(&mut self.levels);
    let depth = levels.len();
    let total: usize = levels.iter().map(Vec::len).sum();
    let mut nodes = Vec::with_capacity(total);

    // Offsets in level L point into level L + 1, which starts after all of
    // levels 0..=L have been placed. A relative offset of 0 is valid, so the
    // block is identified by occupancy and level instead.
    let mut placed = 0u32;
    for (level, buffer) in levels.into_iter().enumerate() {
      let next_level_base = placed + buffer.len() as u32;
      let has_blocks = level + 1 < depth;
      nodes.extend(buffer.into_iter().map(|node| Node {
        offset: if has_blocks && !node.is_empty() {
          node.offset + next_level_base
        } else {
          0
        },
        children: node.children,
      }));
      placed = next_level_base;
    }

    nodes
  }
}

#[cfg(test)]
#[path = "build_test.rs"]
mod build_test;
