//! Test fixtures shared by the octree and search tests.
//!
//! Each fixture pairs a configuration with a tester whose resulting layout is
//! small enough to reason about by hand.

use glam::{DVec3, IVec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::octree::{DAabb3, NavConfig, NavOctree, NodeInfo};
use crate::tester::{ObstacleField, OccupancyTester};

// =============================================================================
// Trees
// =============================================================================

/// Build a tree, panicking on a bad configuration.
pub fn built<T: OccupancyTester + ?Sized>(config: NavConfig, tester: &T) -> NavOctree {
  let (tree, _) = NavOctree::build_new(config, tester).expect("valid test config");
  tree
}

/// Depth 8, scale 64 with small spheres every 32 units along z at x = y = 5.
pub fn sphere_line_field() -> ObstacleField {
  ObstacleField::new().with_sphere_line(DVec3::new(5.0, 5.0, -128.0), DVec3::new(0.0, 0.0, 32.0), 9, 1.0)
}

/// Depth 3, scale 8 (root [-32, 32)) with one tiny obstacle in cell [0, 8)^3.
///
/// ```text
///  level 1  octant 0 refined, the other seven free (width 32)
///  level 2  [0, 16)^3 refined, seven free siblings (width 16)
///  level 3  [0, 8)^3 occupied, seven free siblings (width 8)
/// ```
pub fn single_obstacle() -> (NavConfig, ObstacleField) {
  (
    NavConfig::new(3, 8),
    ObstacleField::new().with_sphere(DVec3::splat(4.0), 1.0),
  )
}

/// Depth 4, scale 8 (root [-64, 64)) with a wall at x = 0 leaving a gap
/// above z = 24.
pub fn wall_with_gap() -> (NavConfig, ObstacleField) {
  let wall = DAabb3::new(DVec3::new(-2.0, -64.0, -64.0), DVec3::new(2.0, 64.0, 20.0));
  (NavConfig::new(4, 8), ObstacleField::new().with_box(wall))
}

/// Depth 4, scale 8 with a closed box shell around a cavity near the origin.
///
/// Cells touching the shell count as occupied, which leaves the cavity
/// [-8, 8)^3 free but sealed.
pub fn sealed_cavity() -> (NavConfig, ObstacleField) {
  let (outer, inner) = (24.0, 16.0);
  let mut field = ObstacleField::new();
  for axis in 0..3 {
    for sign in [-1.0, 1.0] {
      let mut min = DVec3::splat(-outer);
      let mut max = DVec3::splat(outer);
      if sign < 0.0 {
        max[axis] = -inner;
      } else {
        min[axis] = inner;
      }
      field = field.with_box(DAabb3::new(min, max));
    }
  }
  (NavConfig::new(4, 8), field)
}

/// Seeded scatter of spheres inside the root cube of `config`.
pub fn random_field(config: &NavConfig, count: usize, seed: u64) -> ObstacleField {
  let mut rng = StdRng::seed_from_u64(seed);
  let half = config.root_width() as f64 / 2.0;
  let origin = config.origin.as_dvec3();
  let mut field = ObstacleField::new();
  for _ in 0..count {
    let center = origin
      + DVec3::new(
        rng.random_range(-half..half),
        rng.random_range(-half..half),
        rng.random_range(-half..half),
      );
    let radius = rng.random_range(1.0..half / 6.0);
    field = field.with_sphere(center, radius);
  }
  field
}

/// Seeded positions inside the root cube of `config`.
pub fn random_positions(config: &NavConfig, count: usize, seed: u64) -> Vec<DVec3> {
  let mut rng = StdRng::seed_from_u64(seed);
  let half = config.root_width() as f64 / 2.0;
  let origin = config.origin.as_dvec3();
  (0..count)
    .map(|_| {
      origin
        + DVec3::new(
          rng.random_range(-half..half),
          rng.random_range(-half..half),
          rng.random_range(-half..half),
        )
    })
    .collect()
}

// =============================================================================
// Assertions
// =============================================================================

/// Every leaf of the tree, in traversal order.
pub fn leaves(tree: &NavOctree) -> Vec<NodeInfo> {
  let mut out = Vec::new();
  tree.visit_leaves(|leaf, _| out.push(*leaf));
  out
}

/// True when two regions share a face of positive area.
pub fn shares_face(tree: &NavOctree, a: &NodeInfo, b: &NodeInfo) -> bool {
  let config = tree.config();
  let ba = config.region_bounds(a.center, a.level);
  let bb = config.region_bounds(b.center, b.level);
  let overlap = ba.max.min(bb.max) - ba.min.max(bb.min);
  let touching = overlap.to_array().iter().filter(|&&o| o == 0.0).count();
  let spanning = overlap.to_array().iter().filter(|&&o| o > 0.0).count();
  touching == 1 && spanning == 2
}

/// Center of a region as a query position.
pub fn at(center: IVec3) -> DVec3 {
  center.as_dvec3()
}
