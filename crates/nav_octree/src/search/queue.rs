//! Batched path requests.
//!
//! Same shape as the other per-frame stages: Enqueue → Tick → Completions.
//! `tick` resolves every pending request against one tree in parallel on
//! rayon's pool. The tree is only read, so any number of searches can share it.

use glam::DVec3;
use rayon::prelude::*;
use web_time::Instant;

use super::{Path, SearchLimits};
use crate::error::PathError;
use crate::octree::NavOctree;

/// A queued search.
#[derive(Clone, Copy, Debug)]
pub struct PathRequest {
  /// Unique identifier for this request
  pub id: u64,
  pub from: DVec3,
  pub to: DVec3,
  pub limits: SearchLimits,
}

/// Finished search.
#[derive(Clone, Debug)]
pub struct PathCompletion {
  /// Request ID this completion corresponds to
  pub id: u64,
  pub result: Result<Path, PathError>,
  /// Search time in microseconds
  pub search_us: u64,
}

/// Collects path requests and resolves them in parallel batches.
#[derive(Debug)]
pub struct PathQueue {
  pending: Vec<PathRequest>,
  completed: Vec<PathCompletion>,
  next_id: u64,
  limits: SearchLimits,
}

impl Default for PathQueue {
  fn default() -> Self {
    Self::new()
  }
}

impl PathQueue {
  /// Create a queue applying [`SearchLimits::DEFAULT`] to each request.
  pub fn new() -> Self {
    Self::with_limits(SearchLimits::DEFAULT)
  }

  /// Create a queue with its own default limits.
  pub fn with_limits(limits: SearchLimits) -> Self {
    Self {
      pending: Vec::new(),
      completed: Vec::new(),
      next_id: 0,
      limits,
    }
  }

  /// Enqueue a search with the queue's limits, returning the assigned ID.
  pub fn enqueue(&mut self, from: DVec3, to: DVec3) -> u64 {
    self.enqueue_with(from, to, self.limits)
  }

  /// Enqueue a search with explicit limits.
  pub fn enqueue_with(&mut self, from: DVec3, to: DVec3, limits: SearchLimits) -> u64 {
    let id = self.next_id;
    self.next_id += 1;
    self.pending.push(PathRequest { id, from, to, limits });
    id
  }

  /// Resolve every pending request against `tree`.
  /// Returns the number of searches run this tick.
  pub fn tick(&mut self, tree: &NavOctree) -> usize {
    if self.pending.is_empty() {
      return 0;
    }

    let requests = std::mem::take(&mut self.pending);
    let count = requests.len();

    let completions: Vec<PathCompletion> = requests
      .into_par_iter()
      .map(|req| {
        let start = Instant::now();
        let result = tree.find_path_with(req.from, req.to, req.limits);
        PathCompletion {
          id: req.id,
          result,
          search_us: start.elapsed().as_micros() as u64,
        }
      })
      .collect();

    self.completed.extend(completions);
    count
  }

  /// Take all completed searches, in request order.
  pub fn drain_completions(&mut self) -> Vec<PathCompletion> {
    std::mem::take(&mut self.completed)
  }

  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }

  pub fn completed_count(&self) -> usize {
    self.completed.len()
  }

  /// True when no work remains.
  pub fn is_idle(&self) -> bool {
    self.pending.is_empty() && self.completed.is_empty()
  }
}

#[cfg(test)]
#[path = "queue_test.rs"]
mod queue_test;
