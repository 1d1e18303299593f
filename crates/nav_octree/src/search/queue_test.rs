use super::*;
use crate::octree::NavConfig;
use crate::test_utils::{built, sealed_cavity, wall_with_gap};

#[test]
fn test_single_request() {
  let (config, field) = wall_with_gap();
  let tree = built(config, &field);
  let mut queue = PathQueue::new();

  let id = queue.enqueue(DVec3::new(-40.0, 0.0, -40.0), DVec3::new(40.0, 0.0, -40.0));
  assert_eq!(id, 0);
  assert_eq!(queue.pending_count(), 1);

  let processed = queue.tick(&tree);
  assert_eq!(processed, 1);
  assert_eq!(queue.pending_count(), 0);
  assert_eq!(queue.completed_count(), 1);

  let completions = queue.drain_completions();
  assert_eq!(completions.len(), 1);
  assert_eq!(completions[0].id, 0);
  assert!(completions[0].result.is_ok());
}

/// Completions come back in request order with their own outcomes.
#[test]
fn test_mixed_outcomes() {
  let (config, field) = sealed_cavity();
  let tree = built(config, &field);
  let mut queue = PathQueue::with_limits(SearchLimits::UNLIMITED);

  let outside = DVec3::new(50.0, 50.0, 50.0);
  queue.enqueue(outside, DVec3::new(-50.0, 40.0, -30.0));
  queue.enqueue(outside, DVec3::new(1.0, 1.0, 1.0));
  queue.enqueue(outside, DVec3::new(500.0, 0.0, 0.0));
  queue.enqueue_with(outside, DVec3::new(-50.0, -50.0, -50.0), SearchLimits::expansions(1));

  assert_eq!(queue.tick(&tree), 4);
  let completions = queue.drain_completions();
  let ids: Vec<u64> = completions.iter().map(|c| c.id).collect();
  assert_eq!(ids, vec![0, 1, 2, 3]);

  assert!(completions[0].result.is_ok());
  assert!(matches!(completions[1].result, Err(PathError::Unreachable { .. })));
  assert_eq!(completions[2].result, Err(PathError::GoalOutOfBounds));
  assert!(matches!(completions[3].result, Err(PathError::LimitExceeded { .. })));
}

#[test]
fn test_empty_tick() {
  let tree = built(NavConfig::new(3, 8), &crate::tester::EmptySpace);
  let mut queue = PathQueue::new();
  assert!(queue.is_idle());

  assert_eq!(queue.tick(&tree), 0);
  assert!(queue.drain_completions().is_empty());
}

/// IDs keep increasing across ticks.
#[test]
fn test_ids_are_monotonic() {
  let tree = built(NavConfig::new(3, 8), &crate::tester::EmptySpace);
  let mut queue = PathQueue::new();

  queue.enqueue(DVec3::splat(-10.0), DVec3::splat(10.0));
  queue.tick(&tree);
  queue.drain_completions();

  let id = queue.enqueue(DVec3::splat(-10.0), DVec3::splat(10.0));
  assert_eq!(id, 1);
  assert!(!queue.is_idle());
}
