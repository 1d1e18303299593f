use super::*;
use crate::octree::NavConfig;
use crate::test_utils::{built, random_field, single_obstacle, sphere_line_field};
use crate::tester::EmptySpace;

// =========================================================================
// Batch 5: Leaf traversal
// =========================================================================

#[test]
fn test_unbuilt_tree_has_no_leaves() {
  let tree = NavOctree::new(NavConfig::default()).unwrap();
  let mut visited = 0;
  tree.visit_leaves(|_, _| visited += 1);
  assert_eq!(visited, 0);
  assert_eq!(tree.leaf_counts(), LeafCounts::default());
}

/// An empty world is eight free level-1 regions.
#[test]
fn test_empty_world_leaves() {
  let config = NavConfig::new(4, 8);
  let tree = built(config, &EmptySpace);

  let mut widths = Vec::new();
  tree.visit_leaves(|leaf, width| {
    assert_eq!(leaf.kind, NodeKind::Free);
    assert_eq!(leaf.level, 1);
    widths.push(width);
  });
  assert_eq!(widths, vec![config.root_width() / 2; 8]);
}

#[test]
fn test_single_obstacle_counts() {
  let (config, field) = single_obstacle();
  let counts = built(config, &field).leaf_counts();

  assert_eq!(&counts.free[..4], &[0, 7, 7, 7]);
  assert_eq!(&counts.occupied[..4], &[0, 0, 0, 1]);
  assert_eq!(counts.total_free(), 21);
  assert_eq!(counts.total_occupied(), 1);
}

/// Leaves tile the root cube exactly: their volumes add up to it.
#[test]
fn test_leaves_partition_root() {
  let config = NavConfig::default();
  let tree = built(config, &sphere_line_field());

  let mut volume = 0u128;
  tree.visit_leaves(|_, width| volume += (width as u128).pow(3));
  assert_eq!(volume, (config.root_width() as u128).pow(3));
}

/// Width passed to the visitor matches the leaf's level.
#[test]
fn test_visitor_width_matches_level() {
  let config = NavConfig::new(5, 8);
  let tree = built(config, &random_field(&config, 10, 3));

  let mut visited = 0u32;
  tree.visit_leaves(|leaf, width| {
    visited += 1;
    assert_eq!(width, config.node_width(leaf.level));
    assert!(leaf.level >= 1 && leaf.level <= config.depth);
  });

  let counts = tree.leaf_counts();
  assert_eq!(visited, counts.total_free() + counts.total_occupied());
}
