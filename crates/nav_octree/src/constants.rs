//! Octant and face lookup tables shared by the builder, locator and neighbor
//! resolver.
//!
//! # Octant Layout
//!
//! Octants are indexed by the sign pattern of their center relative to the
//! parent center. The order walks the upper (+Y) half counter-clockwise when
//! viewed from above, then repeats for the lower (-Y) half:
//!
//! ```text
//!   +Y half (octants 0-3)          -Y half (octants 4-7)
//!
//!        -Z                             -Z
//!    ┌─────┬─────┐                  ┌─────┬─────┐
//!    │  2  │  3  │                  │  6  │  7  │
//! -X ├─────┼─────┤ +X            -X ├─────┼─────┤ +X
//!    │  1  │  0  │                  │  5  │  4  │
//!    └─────┴─────┘                  └─────┴─────┘
//!        +Z                             +Z
//! ```
//!
//! # Faces
//!
//! Faces follow the `-X, +X, -Y, +Y, -Z, +Z` order, so the opposite of face
//! `f` is always `f ^ 1`. [`FACE_OCTANTS`] holds, per face, the mask of the
//! four octants whose outer side lies on that face:
//!
//! ```text
//! face   octants      mask
//! -X     1 2 5 6      0b0110_0110
//! +X     0 3 4 7      0b1001_1001
//! -Y     4 5 6 7      0b1111_0000
//! +Y     0 1 2 3      0b0000_1111
//! -Z     2 3 6 7      0b1100_1100
//! +Z     0 1 4 5      0b0011_0011
//! ```

use glam::IVec3;

/// Maximum tree depth. Addresses pack 4 bits per level into a `u64`.
pub const MAX_DEPTH: u8 = 16;

/// Smallest node width (world units) any level may have.
pub const MIN_NODE_WIDTH: i32 = 4;

/// Number of children per node.
pub const OCTANT_COUNT: usize = 8;

/// Number of axis-aligned faces per node.
pub const FACE_COUNT: usize = 6;

/// Sign of each octant's center offset from its parent center.
pub const OCTANT_SIGNS: [IVec3; OCTANT_COUNT] = [
  IVec3::new(1, 1, 1),
  IVec3::new(-1, 1, 1),
  IVec3::new(-1, 1, -1),
  IVec3::new(1, 1, -1),
  IVec3::new(1, -1, 1),
  IVec3::new(-1, -1, 1),
  IVec3::new(-1, -1, -1),
  IVec3::new(1, -1, -1),
];

/// Unit direction of each face.
pub const FACE_OFFSETS: [IVec3; FACE_COUNT] = [
  IVec3::new(-1, 0, 0), // -X
  IVec3::new(1, 0, 0),  // +X
  IVec3::new(0, -1, 0), // -Y
  IVec3::new(0, 1, 0),  // +Y
  IVec3::new(0, 0, -1), // -Z
  IVec3::new(0, 0, 1),  // +Z
];

/// Octants touching each face, as a children-style bitmask.
pub const FACE_OCTANTS: [u8; FACE_COUNT] = [
  0b0110_0110, // -X
  0b1001_1001, // +X
  0b1111_0000, // -Y
  0b0000_1111, // +Y
  0b1100_1100, // -Z
  0b0011_0011, // +Z
];

/// Face on the other side of the same axis.
#[inline]
pub const fn opposite_face(face: usize) -> usize {
  face ^ 1
}

/// Octant index for a sign pattern (`true` = positive side of the axis).
#[inline]
pub const fn octant_from_signs(pos_x: bool, pos_y: bool, pos_z: bool) -> u8 {
  match (pos_y, pos_z, pos_x) {
    (true, true, true) => 0,
    (true, true, false) => 1,
    (true, false, false) => 2,
    (true, false, true) => 3,
    (false, true, true) => 4,
    (false, true, false) => 5,
    (false, false, false) => 6,
    (false, false, true) => 7,
  }
}

/// Iterate the octant indices set in a children-style mask, lowest first.
#[inline]
pub fn octants_in(mask: u8) -> impl Iterator<Item = u8> {
  (0..OCTANT_COUNT as u8).filter(move |octant| mask & (1 << octant) != 0)
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
