//! Engine-agnostic metrics collection for navigation statistics.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use nav_octree::metrics::{NavMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // After each build:
//! metrics.record_build(&stats);
//! metrics.update_from_tree(&tree);
//!
//! // For each search:
//! metrics.record_search(&completion.result, completion.search_us);
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::constants::MAX_DEPTH;
use crate::error::PathError;
use crate::octree::{BuildStats, NavOctree};
use crate::search::Path;

const LEVELS: usize = MAX_DEPTH as usize + 1;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create a new rolling window with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate over values (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    /// Get the most recent value.
    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl RollingWindow<u64> {
    pub fn sum(&self) -> u64 {
        self.buffer.iter().sum()
    }

    /// Compute the average of all values.
    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.buffer.len() as f64
        }
    }

    /// Get min and max values.
    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = self.buffer.iter().min()?;
        let max = self.buffer.iter().max()?;
        Some((*min, *max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(128)
    }
}

/// Tree shape and query statistics for one world.
#[derive(Debug, Clone)]
pub struct NavMetrics {
    // Tree shape
    /// Node records per level from the last build (index = level).
    pub nodes_per_level: [u32; LEVELS],
    /// Free leaves per level.
    pub free_leaves_per_level: [u32; LEVELS],
    /// Occupied cells per level (only the finest level is ever non-zero).
    pub occupied_leaves_per_level: [u32; LEVELS],
    /// Heap bytes held by the node array.
    pub tree_memory_bytes: u64,

    // Timing
    /// Rolling window of build times in microseconds.
    pub build_timings: RollingWindow<u64>,
    /// Rolling window of search times in microseconds.
    pub search_timings: RollingWindow<u64>,
    /// Rolling window of nodes expanded per search.
    pub search_expansions: RollingWindow<u64>,

    // Outcomes
    pub last_build_us: u64,
    pub total_builds: u64,
    pub searches_succeeded: u64,
    pub searches_unreachable: u64,
    pub searches_cut_off: u64,
    /// Searches rejected before running (bad endpoints, unbuilt tree).
    pub searches_rejected: u64,
}

impl Default for NavMetrics {
    fn default() -> Self {
        Self {
            nodes_per_level: [0; LEVELS],
            free_leaves_per_level: [0; LEVELS],
            occupied_leaves_per_level: [0; LEVELS],
            tree_memory_bytes: 0,
            build_timings: RollingWindow::new(32),
            search_timings: RollingWindow::new(128),
            search_expansions: RollingWindow::new(128),
            last_build_us: 0,
            total_builds: 0,
            searches_succeeded: 0,
            searches_unreachable: 0,
            searches_cut_off: 0,
            searches_rejected: 0,
        }
    }
}

impl NavMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset everything except cumulative counters.
    pub fn reset(&mut self) {
        self.nodes_per_level.fill(0);
        self.free_leaves_per_level.fill(0);
        self.occupied_leaves_per_level.fill(0);
        self.tree_memory_bytes = 0;
        self.build_timings.clear();
        self.search_timings.clear();
        self.search_expansions.clear();
        self.last_build_us = 0;
    }

    /// Record a finished build.
    pub fn record_build(&mut self, stats: &BuildStats) {
        if !is_enabled() {
            return;
        }
        self.nodes_per_level.fill(0);
        for (slot, &count) in self.nodes_per_level.iter_mut().zip(&stats.nodes_per_level) {
            *slot = count as u32;
        }
        self.build_timings.push(stats.build_us);
        self.last_build_us = stats.build_us;
        self.total_builds += 1;
    }

    /// Refresh leaf distribution and memory from a built tree.
    pub fn update_from_tree(&mut self, tree: &NavOctree) {
        if !is_enabled() {
            return;
        }
        let counts = tree.leaf_counts();
        self.free_leaves_per_level = counts.free;
        self.occupied_leaves_per_level = counts.occupied;
        self.tree_memory_bytes = tree.memory_bytes() as u64;
    }

    /// Record the outcome and duration of one search.
    pub fn record_search(&mut self, result: &Result<Path, PathError>, search_us: u64) {
        if !is_enabled() {
            return;
        }
        self.search_timings.push(search_us);
        match result {
            Ok(path) => {
                self.searches_succeeded += 1;
                self.search_expansions.push(path.expanded() as u64);
            }
            Err(PathError::Unreachable { expanded }) => {
                self.searches_unreachable += 1;
                self.search_expansions.push(*expanded as u64);
            }
            Err(PathError::LimitExceeded { expanded }) => {
                self.searches_cut_off += 1;
                self.search_expansions.push(*expanded as u64);
            }
            Err(_) => self.searches_rejected += 1,
        }
    }

    pub fn total_nodes(&self) -> u32 {
        self.nodes_per_level.iter().sum()
    }

    pub fn total_free_leaves(&self) -> u32 {
        self.free_leaves_per_level.iter().sum()
    }

    pub fn total_searches(&self) -> u64 {
        self.searches_succeeded + self.searches_unreachable + self.searches_cut_off + self.searches_rejected
    }

    /// Get average search timing in microseconds.
    pub fn avg_search_timing_us(&self) -> f64 {
        self.search_timings.average()
    }

    /// Get average build timing in microseconds.
    pub fn avg_build_timing_us(&self) -> f64 {
        self.build_timings.average()
    }

    pub fn tree_memory_kb(&self) -> f64 {
        self.tree_memory_bytes as f64 / 1024.0
    }
}
