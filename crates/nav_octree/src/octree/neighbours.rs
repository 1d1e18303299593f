//! Neighbor resolver - free regions sharing a face with a region.
//!
//! For each face, the resolver looks up the region at the *same* level on the
//! other side (center offset by one node width). Three things can happen:
//!
//! ```text
//!  same size, free        coarser, free          same size, refined
//!  ┌────┬────┐            ┌────┬─────────┐       ┌────┬──┬──┐
//!  │ R  │ N  │            │ R  │         │       │ R  │a │  │
//!  └────┴────┘            ├────┤    N    │       │    ├──┼──┤
//!                         │    │         │       │    │b │  │
//!                         └────┴─────────┘       └────┴──┴──┘
//!  N is the neighbor      N is the neighbor      descend N along the face
//!                                                touching R: a, b, ...
//! ```
//!
//! The refined case walks [`FACE_OCTANTS`] of the face pointing back at `R`,
//! recursing through refined children until it reaches leaves. Only free
//! leaves are reported; occupied cells are walls.

use smallvec::SmallVec;

use super::locate::{Cursor, Step};
use super::{NavOctree, NodeInfo, NodeKind};
use crate::constants::{octants_in, opposite_face, FACE_COUNT, FACE_OCTANTS, FACE_OFFSETS};

impl NavOctree {
  /// Free leaves adjacent to `info` across any of its six faces.
  pub fn neighbours(&self, info: &NodeInfo) -> Vec<NodeInfo> {
    let mut out = Vec::new();
    self.collect_neighbours(info, &mut out);
    out
  }

  /// Append the free leaves adjacent to `info` to `out`.
  ///
  /// Faces on the root boundary have nothing on the other side.
  pub fn collect_neighbours(&self, info: &NodeInfo, out: &mut Vec<NodeInfo>) {
    // Probes of boundary regions land past the root, which may be past i32.
    let width = self.config().node_width(info.level) as i64;
    let center = info.center.as_i64vec3();
    for face in 0..FACE_COUNT {
      let probe = center + FACE_OFFSETS[face].as_i64vec3() * width;
      let Some(found) = self.find_nearest(probe.as_dvec3(), info.level) else {
        continue;
      };
      match found.kind {
        NodeKind::Free => out.push(found),
        NodeKind::Occupied => {}
        NodeKind::Refined => self.collect_face_leaves(&found, opposite_face(face), out),
      }
    }
  }

  /// Free leaves of a refined region that touch its `face`.
  ///
  /// Leaves and out-of-range faces yield nothing.
  pub fn collect_face_leaves(&self, region: &NodeInfo, face: usize, out: &mut Vec<NodeInfo>) {
    let Some(&face_mask) = FACE_OCTANTS.get(face) else {
      return;
    };
    let Some(record) = self.region_record(region) else {
      return;
    };

    let mut stack: SmallVec<[Cursor; 16]> = SmallVec::new();
    stack.push(Cursor {
      record,
      parent: region.index,
      center: region.center,
      level: region.level,
      address: region.address,
    });

    while let Some(at) = stack.pop() {
      for octant in octants_in(face_mask) {
        match self.step(&at, octant) {
          Step::Leaf(leaf) if leaf.is_free() => out.push(leaf),
          Step::Leaf(_) => {}
          Step::Branch(next) => stack.push(next),
        }
      }
    }
  }
}

#[cfg(test)]
#[path = "neighbours_test.rs"]
mod neighbours_test;
