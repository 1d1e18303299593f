//! Locator - turns world positions and addresses into regions.
//!
//! All lookups descend from the root one octant at a time. The octant holding
//! a position is chosen per axis with `pos >= center` meaning the positive
//! half, which matches the half-open bounds of [`DAabb3::contains_point`].
//!
//! [`DAabb3::contains_point`]: super::DAabb3::contains_point

use glam::{DVec3, IVec3};

use super::{Address, NavOctree, NodeInfo, NodeKind};
use crate::constants::octant_from_signs;

/// Position of a descent through refined regions.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor {
  /// Record of the region the cursor stands on.
  pub record: u32,
  /// Record whose mask describes that region.
  pub parent: u32,
  pub center: IVec3,
  pub level: u8,
  pub address: Address,
}

impl Cursor {
  pub(crate) fn root(origin: IVec3) -> Self {
    Self {
      record: 0,
      parent: 0,
      center: origin,
      level: 0,
      address: Address::ROOT,
    }
  }

  /// The refined region under the cursor.
  pub(crate) fn info(&self) -> NodeInfo {
    NodeInfo {
      center: self.center,
      index: self.parent,
      address: self.address,
      level: self.level,
      kind: NodeKind::Refined,
    }
  }
}

/// Outcome of stepping into one octant.
pub(crate) enum Step {
  /// Free region or finest occupied cell; the descent ends here.
  Leaf(NodeInfo),
  /// Refined region with its own record.
  Branch(Cursor),
}

/// Octant of the region centered at `center` that holds `pos`.
#[inline]
pub(crate) fn octant_toward(center: IVec3, pos: DVec3) -> u8 {
  let c = center.as_dvec3();
  octant_from_signs(pos.x >= c.x, pos.y >= c.y, pos.z >= c.z)
}

impl NavOctree {
  /// Step from `at` into `octant`.
  pub(crate) fn step(&self, at: &Cursor, octant: u8) -> Step {
    let node = self.node(at.record);
    let level = at.level + 1;
    let center = self.config().child_center(at.center, at.level, octant);
    let address = at.address.with_octant(at.level, octant);

    if node.is_occupied(octant) && level < self.depth() {
      return Step::Branch(Cursor {
        record: node.child_index(octant),
        parent: at.record,
        center,
        level,
        address,
      });
    }

    let kind = if node.is_occupied(octant) {
      NodeKind::Occupied
    } else {
      NodeKind::Free
    };
    Step::Leaf(NodeInfo {
      center,
      index: at.record,
      address,
      level,
      kind,
    })
  }

  /// True when `pos` lies inside the root cube.
  #[inline]
  pub fn contains(&self, pos: DVec3) -> bool {
    self.config().root_bounds().contains_point(pos)
  }

  /// Address of the finest occupied cell containing `pos`.
  ///
  /// Returns `None` outside the tree, on an unbuilt tree, and whenever `pos`
  /// lies in free space, however large. Use [`find_nearest`] to resolve
  /// navigable regions.
  ///
  /// [`find_nearest`]: NavOctree::find_nearest
  pub fn find(&self, pos: DVec3) -> Option<Address> {
    self
      .find_nearest(pos, self.depth())
      .filter(|info| info.kind == NodeKind::Occupied)
      .map(|info| info.address)
  }

  /// Region containing `pos`, no deeper than `max_level`.
  ///
  /// The descent stops at the first leaf (free region or occupied cell) or at
  /// `max_level`, in which case the result may be [`NodeKind::Refined`].
  /// `max_level` above the tree depth is clamped.
  pub fn find_nearest(&self, pos: DVec3, max_level: u8) -> Option<NodeInfo> {
    if !self.is_built() || !self.contains(pos) {
      return None;
    }

    let max_level = max_level.min(self.depth());
    let mut at = Cursor::root(self.config().origin);
    loop {
      if at.level >= max_level {
        return Some(at.info());
      }
      match self.step(&at, octant_toward(at.center, pos)) {
        Step::Leaf(info) => return Some(info),
        Step::Branch(next) => at = next,
      }
    }
  }

  /// Region named by `address`, if it exists in this tree.
  ///
  /// Fails for malformed addresses and for paths that continue below a leaf.
  pub fn resolve(&self, address: Address) -> Option<NodeInfo> {
    if !self.is_built() || !address.is_well_formed() || address.level() > self.depth() {
      return None;
    }

    let target = address.level();
    let mut at = Cursor::root(self.config().origin);
    for octant in address.octants() {
      match self.step(&at, octant) {
        Step::Leaf(info) => return (info.level == target).then_some(info),
        Step::Branch(next) => at = next,
      }
    }
    Some(at.info())
  }

  /// Record owned by a refined region.
  pub(crate) fn region_record(&self, info: &NodeInfo) -> Option<u32> {
    if info.kind != NodeKind::Refined {
      return None;
    }
    if info.level == 0 {
      return Some(0);
    }
    let octant = info.address.octant(info.level - 1)?;
    Some(self.node(info.index).child_index(octant))
  }
}

#[cfg(test)]
#[path = "locate_test.rs"]
mod locate_test;
