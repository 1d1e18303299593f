//! Address - packed root-to-node octant path.
//!
//! ```text
//! bits:   63..60  ...  11..8   7..4   3..0
//! field:  lvl 15  ...  lvl 2  lvl 1  lvl 0
//! value:  octant + 1, 0 = unset
//! ```
//!
//! Field `n` holds the octant chosen when descending from level `n` to level
//! `n + 1`, so a region at level `L` has exactly its first `L` fields set.

use std::fmt;

use crate::constants::MAX_DEPTH;

const BITS_PER_LEVEL: u32 = 4;
const FIELD_MASK: u64 = 0xF;

/// Packed path code identifying a region by its octant choices from the root.
///
/// Comparable and hashable without touching the tree, which makes it the map
/// key used during path search.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(u64);

impl Address {
  /// The root region (no octant choices).
  pub const ROOT: Self = Self(0);

  /// Wrap a raw code.
  #[inline]
  pub const fn from_raw(raw: u64) -> Self {
    Self(raw)
  }

  /// Raw packed code.
  #[inline]
  pub const fn raw(self) -> u64 {
    self.0
  }

  /// Build an address from a sequence of octants, root first.
  pub fn from_octants(octants: &[u8]) -> Self {
    debug_assert!(octants.len() <= MAX_DEPTH as usize);
    octants
      .iter()
      .enumerate()
      .fold(Self::ROOT, |address, (level, &octant)| address.with_octant(level as u8, octant))
  }

  /// Set field `level` to `octant`.
  #[inline]
  pub fn with_octant(self, level: u8, octant: u8) -> Self {
    debug_assert!(level < MAX_DEPTH, "level {} beyond address width", level);
    debug_assert!(octant < 8, "octant {} out of range", octant);
    let shift = level as u32 * BITS_PER_LEVEL;
    Self((self.0 & !(FIELD_MASK << shift)) | ((octant as u64 + 1) << shift))
  }

  /// Octant stored in field `level`, if set.
  #[inline]
  pub fn octant(self, level: u8) -> Option<u8> {
    if level >= MAX_DEPTH {
      return None;
    }
    let field = (self.0 >> (level as u32 * BITS_PER_LEVEL)) & FIELD_MASK;
    match field {
      0 => None,
      1..=8 => Some(field as u8 - 1),
      _ => None,
    }
  }

  /// Number of leading set fields, i.e. the level of the addressed region.
  pub fn level(self) -> u8 {
    (0..MAX_DEPTH)
      .take_while(|&level| self.octant(level).is_some())
      .count() as u8
  }

  /// True when every set field is a valid octant and there are no gaps.
  pub fn is_well_formed(self) -> bool {
    let level = self.level() as u32;
    let used_bits = level * BITS_PER_LEVEL;
    used_bits == u64::BITS || self.0 >> used_bits == 0
  }

  /// Address of the enclosing region, `None` for the root.
  pub fn parent(self) -> Option<Self> {
    let level = self.level();
    if level == 0 {
      return None;
    }
    let shift = (level - 1) as u32 * BITS_PER_LEVEL;
    Some(Self(self.0 & !(FIELD_MASK << shift)))
  }

  /// Octants from the root downward.
  pub fn octants(self) -> impl Iterator<Item = u8> {
    (0..MAX_DEPTH).map_while(move |level| self.octant(level))
  }

  #[inline]
  pub fn is_root(self) -> bool {
    self.0 == 0
  }
}

impl fmt::Debug for Address {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Address(")?;
    for (i, octant) in self.octants().enumerate() {
      if i > 0 {
        write!(f, ".")?;
      }
      write!(f, "{}", octant)?;
    }
    write!(f, ")")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_root_is_zero() {
    assert_eq!(Address::ROOT.raw(), 0);
    assert_eq!(Address::ROOT.level(), 0);
    assert!(Address::ROOT.is_root());
    assert_eq!(Address::ROOT.parent(), None);
  }

  /// Octants are stored offset by one so octant 0 is distinguishable from unset.
  #[test]
  fn test_octant_zero_is_not_unset() {
    let address = Address::ROOT.with_octant(0, 0);
    assert_eq!(address.raw(), 1);
    assert_eq!(address.octant(0), Some(0));
    assert_eq!(address.level(), 1);
  }

  #[test]
  fn test_fields_pack_four_bits_per_level() {
    let address = Address::from_octants(&[3, 7, 0]);
    assert_eq!(address.raw(), 0x184);
    assert_eq!(address.octants().collect::<Vec<_>>(), vec![3, 7, 0]);
    assert_eq!(address.level(), 3);
  }

  #[test]
  fn test_full_depth_address() {
    let octants = [7u8; 16];
    let address = Address::from_octants(&octants);
    assert_eq!(address.raw(), 0x8888_8888_8888_8888);
    assert_eq!(address.level(), 16);
    assert!(address.is_well_formed());
    assert_eq!(address.octant(15), Some(7));
    assert_eq!(address.octant(16), None);
  }

  #[test]
  fn test_parent_strips_last_field() {
    let address = Address::from_octants(&[1, 2, 3]);
    let parent = address.parent().unwrap();
    assert_eq!(parent, Address::from_octants(&[1, 2]));
    assert_eq!(parent.parent().unwrap().parent().unwrap(), Address::ROOT);
  }

  #[test]
  fn test_with_octant_overwrites_field() {
    let address = Address::from_octants(&[1, 2]).with_octant(1, 5);
    assert_eq!(address, Address::from_octants(&[1, 5]));
  }

  /// Regions at different levels along the same path never collide.
  #[test]
  fn test_prefixes_are_distinct() {
    let path = [0u8, 0, 0, 0];
    let mut seen = std::collections::HashSet::new();
    for len in 0..=path.len() {
      assert!(seen.insert(Address::from_octants(&path[..len])));
    }
  }

  #[test]
  fn test_gaps_are_not_well_formed() {
    // Field 0 unset, field 1 set
    assert!(!Address::from_raw(0x10).is_well_formed());
    // Field value 9 is not an octant
    assert!(!Address::from_raw(0x9).is_well_formed());
    assert!(Address::from_octants(&[4, 4]).is_well_formed());
  }

  #[test]
  fn test_debug_lists_octants() {
    assert_eq!(format!("{:?}", Address::from_octants(&[6, 0, 2])), "Address(6.0.2)");
    assert_eq!(format!("{:?}", Address::ROOT), "Address()");
  }
}
