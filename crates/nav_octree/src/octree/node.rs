//! Node records of the finalized tree and resolved query results.

use glam::IVec3;

use super::Address;

/// One record of the finalized node array.
///
/// Bit `i` of `children` is set when octant `i` was reported occupied. An
/// occupied octant above the finest level has its own record at
/// `offset + i`; every octant of a refined node gets a slot, free ones stay
/// [`Node::EMPTY`].
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[repr(C)]
pub struct Node {
  /// Index of the first of this node's eight child slots (0 when none).
  pub offset: u32,
  /// Occupancy mask, one bit per octant.
  pub children: u8,
}

impl Node {
  /// Placeholder for a free octant.
  pub const EMPTY: Self = Self {
    offset: 0,
    children: 0,
  };

  #[inline]
  pub fn is_occupied(&self, octant: u8) -> bool {
    self.children & (1 << octant) != 0
  }

  /// No octant is occupied.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.children == 0
  }

  /// Index of the record for `octant`. Only meaningful for refined octants.
  #[inline]
  pub fn child_index(&self, octant: u8) -> u32 {
    self.offset + octant as u32
  }
}

/// What a resolved region is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NodeKind {
  /// Uniform free space, navigable.
  Free,
  /// Occupied cell at the finest level.
  Occupied,
  /// Occupied region with its own node record; further subdivided.
  Refined,
}

/// A region resolved by the locator or the neighbor resolver.
///
/// Ephemeral: produced per query, never stored in the tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeInfo {
  /// World-space center.
  pub center: IVec3,
  /// Index of the node record whose children mask describes this region.
  /// The root region reports its own record, 0.
  pub index: u32,
  /// Packed path from the root.
  pub address: Address,
  /// Tree level of the region (0 = root).
  pub level: u8,
  /// Contents of the region.
  pub kind: NodeKind,
}

impl NodeInfo {
  /// Navigable by the path search.
  #[inline]
  pub fn is_free(&self) -> bool {
    self.kind == NodeKind::Free
  }

  /// Leaf of the tree (free region or finest occupied cell).
  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.kind != NodeKind::Refined
  }

  /// Manhattan distance between the centers of two regions.
  #[inline]
  pub fn manhattan(&self, other: &NodeInfo) -> u64 {
    manhattan(self.center, other.center)
  }
}

/// Manhattan distance between two lattice points.
#[inline]
pub fn manhattan(a: IVec3, b: IVec3) -> u64 {
  let d = a.as_i64vec3() - b.as_i64vec3();
  d.x.unsigned_abs() + d.y.unsigned_abs() + d.z.unsigned_abs()
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
