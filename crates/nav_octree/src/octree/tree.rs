//! NavOctree - the finalized, read-only navigation tree.
//!
//! The tree has two states. A fresh tree is *unbuilt*: it has a validated
//! configuration but no nodes, and every query returns nothing. [`build`]
//! moves it to *built*. Rebuilding discards the previous node array entirely.
//!
//! Once built, the node array is never mutated, so a `&NavOctree` (or an
//! `Arc<NavOctree>`) can be queried from any number of threads at once.
//!
//! [`build`]: NavOctree::build

use tracing::info;

use super::build::{BuildStats, TreeBuilder};
use super::{NavConfig, Node};
use crate::error::ConfigError;
use crate::tester::OccupancyTester;

/// Sparse occupancy octree answering locate, neighbor and path queries.
#[derive(Clone, Debug)]
pub struct NavOctree {
  config: NavConfig,
  nodes: Vec<Node>,
}

impl NavOctree {
  /// Create an unbuilt tree.
  ///
  /// Fails when the depth/scale pair cannot form a valid tree.
  pub fn new(config: NavConfig) -> Result<Self, ConfigError> {
    config.validate()?;
    Ok(Self {
      config,
      nodes: Vec::new(),
    })
  }

  /// Unbuilt tree for a config that has already passed validation.
  pub(crate) fn new_unchecked(config: NavConfig) -> Self {
    debug_assert!(config.validate().is_ok());
    Self {
      config,
      nodes: Vec::new(),
    }
  }

  /// Build (or rebuild) the tree from scratch against `tester`.
  #[tracing::instrument(skip_all, name = "octree::build", fields(depth = self.config.depth, scale = self.config.scale))]
  pub fn build<T: OccupancyTester + ?Sized>(&mut self, tester: &T) -> BuildStats {
    self.nodes = Vec::new();
    let (nodes, stats) = TreeBuilder::new(&self.config, tester).run();
    self.nodes = nodes;

    info!(
      nodes = stats.total_nodes,
      queries = stats.tester_queries,
      elapsed_us = stats.build_us,
      "Built navigation tree, per-level nodes {:?}",
      stats.nodes_per_level
    );

    stats
  }

  /// Build a tree in one step.
  pub fn build_new<T: OccupancyTester + ?Sized>(
    config: NavConfig,
    tester: &T,
  ) -> Result<(Self, BuildStats), ConfigError> {
    let mut tree = Self::new(config)?;
    let stats = tree.build(tester);
    Ok((tree, stats))
  }

  #[inline]
  pub fn is_built(&self) -> bool {
    !self.nodes.is_empty()
  }

  #[inline]
  pub fn config(&self) -> &NavConfig {
    &self.config
  }

  #[inline]
  pub fn depth(&self) -> u8 {
    self.config.depth
  }

  #[inline]
  pub fn scale(&self) -> i32 {
    self.config.scale
  }

  /// Finalized node records, root first.
  #[inline]
  pub fn nodes(&self) -> &[Node] {
    &self.nodes
  }

  #[inline]
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Approximate heap memory held by the node array.
  pub fn memory_bytes(&self) -> usize {
    self.nodes.capacity() * std::mem::size_of::<Node>()
  }

  /// Record at `index`. Out-of-range indices are a corrupted tree and panic.
  #[inline]
  pub(crate) fn node(&self, index: u32) -> Node {
    self.nodes[index as usize]
  }
}
