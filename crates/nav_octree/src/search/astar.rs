//! Path search - A* over the free leaves of a built tree.
//!
//! The graph is implicit: vertices are free leaves, edges join leaves that
//! share a face (see [`NavOctree::neighbours`]). Edge cost and heuristic are
//! both the Manhattan distance between region centers. Manhattan distance
//! obeys the triangle inequality, so the heuristic is consistent and the goal
//! is settled at its minimal cost the first time it is popped.
//!
//! ```text
//!  pop lowest f = g + h ──► goal? ──yes──► walk came_from back to start
//!        ▲                    │no
//!        │                    ▼
//!        └──── push ◄── relax each free neighbour
//! ```
//!
//! The frontier uses lazy deletion: an improved cost pushes a fresh entry and
//! the stale one is skipped when popped.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use glam::{DVec3, IVec3};
use tracing::{debug, warn};
use web_time::Instant;

use super::SearchLimits;
use crate::error::PathError;
use crate::octree::{manhattan, Address, NavOctree, NodeInfo, NodeKind};

/// Route between two free leaves, start first.
///
/// A path always holds at least one node: start and goal coincide when both
/// positions fall in the same leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
  nodes: Vec<NodeInfo>,
  cost: u64,
  expanded: usize,
}

impl Path {
  /// Leaves along the route, start first.
  #[inline]
  pub fn nodes(&self) -> &[NodeInfo] {
    &self.nodes
  }

  pub fn into_nodes(self) -> Vec<NodeInfo> {
    self.nodes
  }

  /// Sum of Manhattan distances between consecutive centers.
  #[inline]
  pub fn cost(&self) -> u64 {
    self.cost
  }

  /// Nodes expanded by the search that produced this path.
  #[inline]
  pub fn expanded(&self) -> usize {
    self.expanded
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn start(&self) -> &NodeInfo {
    &self.nodes[0]
  }

  pub fn goal(&self) -> &NodeInfo {
    &self.nodes[self.nodes.len() - 1]
  }

  /// Region centers to steer through.
  pub fn waypoints(&self) -> impl Iterator<Item = IVec3> + '_ {
    self.nodes.iter().map(|node| node.center)
  }
}

/// Frontier entry. `cost` is the accumulated cost when the entry was pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Frontier {
  priority: u64,
  cost: u64,
  address: Address,
}

impl Ord for Frontier {
  fn cmp(&self, other: &Self) -> Ordering {
    // BinaryHeap pops the maximum: invert priority. Among equal priorities
    // prefer the entry furthest along.
    other
      .priority
      .cmp(&self.priority)
      .then_with(|| self.cost.cmp(&other.cost))
      .then_with(|| other.address.cmp(&self.address))
  }
}

impl PartialOrd for Frontier {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

/// Best known way into a leaf.
#[derive(Clone, Copy, Debug)]
struct Visit {
  info: NodeInfo,
  came_from: Option<Address>,
  cost: u64,
  closed: bool,
}

/// Per-call working state. Dropped when the search returns.
struct Search<'a> {
  tree: &'a NavOctree,
  goal: NodeInfo,
  open: BinaryHeap<Frontier>,
  visited: HashMap<Address, Visit>,
  scratch: Vec<NodeInfo>,
  expanded: usize,
}

impl<'a> Search<'a> {
  fn new(tree: &'a NavOctree, start: NodeInfo, goal: NodeInfo) -> Self {
    let mut visited = HashMap::new();
    visited.insert(
      start.address,
      Visit {
        info: start,
        came_from: None,
        cost: 0,
        closed: false,
      },
    );
    let mut open = BinaryHeap::new();
    open.push(Frontier {
      priority: 0,
      cost: 0,
      address: start.address,
    });

    Self {
      tree,
      goal,
      open,
      visited,
      scratch: Vec::with_capacity(32),
      expanded: 0,
    }
  }

  fn run(mut self, limits: &SearchLimits) -> Result<Path, PathError> {
    let started = Instant::now();

    while let Some(entry) = self.open.pop() {
      let Some(visit) = self.visited.get_mut(&entry.address) else {
        continue;
      };
      if visit.closed || entry.cost > visit.cost {
        continue;
      }
      visit.closed = true;
      let (info, cost) = (visit.info, visit.cost);

      if entry.address == self.goal.address {
        return Ok(self.reconstruct(entry.address, cost));
      }

      if !limits.can_expand(self.expanded) {
        return Err(PathError::LimitExceeded {
          expanded: self.expanded,
        });
      }
      if limits.should_check_time(self.expanded) {
        if let Some(budget) = limits.time_budget {
          if started.elapsed() >= budget {
            return Err(PathError::LimitExceeded {
              expanded: self.expanded,
            });
          }
        }
      }

      self.expanded += 1;
      self.expand(&info, cost);
    }

    Err(PathError::Unreachable {
      expanded: self.expanded,
    })
  }

  fn expand(&mut self, info: &NodeInfo, cost: u64) {
    let mut scratch = std::mem::take(&mut self.scratch);
    scratch.clear();
    self.tree.collect_neighbours(info, &mut scratch);
    for candidate in scratch.drain(..) {
      self.process_neighbour(info, cost, candidate);
    }
    self.scratch = scratch;
  }

  /// Relax the edge `from -> candidate`.
  fn process_neighbour(&mut self, from: &NodeInfo, from_cost: u64, candidate: NodeInfo) {
    let cost = from_cost + manhattan(from.center, candidate.center);

    match self.visited.entry(candidate.address) {
      Entry::Occupied(mut slot) => {
        let visit = slot.get_mut();
        if visit.closed || cost >= visit.cost {
          return;
        }
        visit.cost = cost;
        visit.came_from = Some(from.address);
      }
      Entry::Vacant(slot) => {
        slot.insert(Visit {
          info: candidate,
          came_from: Some(from.address),
          cost,
          closed: false,
        });
      }
    }

    self.open.push(Frontier {
      priority: cost + manhattan(candidate.center, self.goal.center),
      cost,
      address: candidate.address,
    });
  }

  /// Walk predecessors from `goal` back to the start.
  fn reconstruct(&self, goal: Address, cost: u64) -> Path {
    let mut nodes = Vec::new();
    let mut at = Some(goal);
    while let Some(address) = at {
      let Some(visit) = self.visited.get(&address) else {
        break;
      };
      nodes.push(visit.info);
      at = visit.came_from;
    }
    nodes.reverse();

    Path {
      nodes,
      cost,
      expanded: self.expanded,
    }
  }
}

impl NavOctree {
  /// Cheapest route through free space from `from` to `to`, without limits.
  pub fn find_path(&self, from: DVec3, to: DVec3) -> Result<Path, PathError> {
    self.find_path_with(from, to, SearchLimits::UNLIMITED)
  }

  /// Cheapest route through free space, giving up once `limits` are hit.
  #[tracing::instrument(skip_all, name = "octree::find_path")]
  pub fn find_path_with(&self, from: DVec3, to: DVec3, limits: SearchLimits) -> Result<Path, PathError> {
    let (start, goal) = self.path_endpoints(from, to)?;
    let result = Search::new(self, start, goal).run(&limits);

    match &result {
      Ok(path) => debug!(
        nodes = path.len(),
        cost = path.cost(),
        expanded = path.expanded(),
        "Path found"
      ),
      Err(PathError::LimitExceeded { expanded }) => {
        warn!(expanded, ?limits, "Path search cut off by limits")
      }
      Err(err) => debug!(%err, "No path"),
    }

    result
  }

  /// Leaves containing the two endpoints, both required to be free.
  fn path_endpoints(&self, from: DVec3, to: DVec3) -> Result<(NodeInfo, NodeInfo), PathError> {
    if !self.is_built() {
      return Err(PathError::NotBuilt);
    }
    let start = self
      .find_nearest(from, self.depth())
      .ok_or(PathError::StartOutOfBounds)?;
    let goal = self
      .find_nearest(to, self.depth())
      .ok_or(PathError::GoalOutOfBounds)?;

    if start.kind == NodeKind::Occupied {
      return Err(PathError::StartBlocked);
    }
    if goal.kind == NodeKind::Occupied {
      return Err(PathError::GoalBlocked);
    }
    Ok((start, goal))
  }
}

#[cfg(test)]
#[path = "astar_test.rs"]
mod astar_test;
