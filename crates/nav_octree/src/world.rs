//! NavWorld - isolated navigation world container.
//!
//! Each world owns its configuration, occupancy tester, transform and the
//! currently published tree. Multiple worlds can exist independently (a level,
//! a moving ship interior, a test arena).
//!
//! # Publishing
//!
//! The tree is held as an `Arc<NavOctree>`. Rebuilds never mutate the
//! published tree: they build a fresh one and swap the `Arc`, so anyone
//! holding a [`snapshot`](NavWorld::snapshot) keeps a consistent tree for as
//! long as they need it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::{DAffine3, DVec3};
use tracing::debug;

use crate::error::{ConfigError, PathError};
use crate::octree::{BuildStats, NavConfig, NavOctree};
use crate::rebuild::{AsyncRebuild, RebuildRequest};
use crate::search::{Path, SearchLimits};
use crate::tester::OccupancyTester;

// =============================================================================
// WorldId - unique identifier
// =============================================================================

/// Atomic counter for generating unique WorldIds.
static WORLD_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque world identifier.
///
/// Generated atomically - guaranteed unique within process lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WorldId(u64);

impl WorldId {
    /// Generate a new unique WorldId.
    pub fn new() -> Self {
        Self(WORLD_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for WorldId {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// NavWorld<T> - per-world state container
// =============================================================================

/// Per-world navigation state, generic over the occupancy tester.
///
/// `T` may be unsized, so engine bridges can use
/// `Arc<dyn OccupancyTester + Send + Sync>` for runtime flexibility.
///
/// # Transform
///
/// The tree lives in local space. The transform places it in global space; the
/// world-space query helpers convert through it and its cached inverse.
pub struct NavWorld<T: OccupancyTester + ?Sized> {
    /// Unique world identifier.
    pub id: WorldId,

    transform: DAffine3,
    inverse: DAffine3,

    config: NavConfig,
    tester: Arc<T>,
    tree: Arc<NavOctree>,
    rebuild: AsyncRebuild,
}

impl<T: OccupancyTester + ?Sized> NavWorld<T> {
    /// Create a world with an unbuilt tree and identity transform.
    pub fn new(config: NavConfig, tester: Arc<T>) -> Result<Self, ConfigError> {
        let tree = NavOctree::new(config)?;
        Ok(Self {
            id: WorldId::new(),
            transform: DAffine3::IDENTITY,
            inverse: DAffine3::IDENTITY,
            config,
            tester,
            tree: Arc::new(tree),
            rebuild: AsyncRebuild::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    #[inline]
    pub fn tester(&self) -> &Arc<T> {
        &self.tester
    }

    /// Replace the tester. Takes effect on the next rebuild.
    pub fn set_tester(&mut self, tester: Arc<T>) {
        self.tester = tester;
    }

    /// The published tree.
    #[inline]
    pub fn tree(&self) -> &NavOctree {
        &self.tree
    }

    /// Shared handle to the published tree, unaffected by later rebuilds.
    pub fn snapshot(&self) -> Arc<NavOctree> {
        Arc::clone(&self.tree)
    }

    /// Build on the calling thread and publish the result.
    pub fn rebuild(&mut self) -> BuildStats {
        let mut tree = NavOctree::new_unchecked(self.config);
        let stats = tree.build(self.tester.as_ref());
        self.tree = Arc::new(tree);
        stats
    }

    /// Check if a background rebuild is running.
    pub fn is_rebuilding(&self) -> bool {
        self.rebuild.is_busy()
    }

    /// Stop waiting for a background rebuild. The published tree is kept.
    pub fn cancel_rebuild(&mut self) {
        self.rebuild.cancel();
    }

    /// Local-to-global transform.
    #[inline]
    pub fn transform(&self) -> &DAffine3 {
        &self.transform
    }

    /// Set the world transform. The transform must be invertible.
    pub fn set_transform(&mut self, transform: DAffine3) {
        self.transform = transform;
        self.inverse = transform.inverse();
    }

    /// Convert a global position to local tree space.
    #[inline]
    pub fn to_local(&self, global_pos: DVec3) -> DVec3 {
        self.inverse.transform_point3(global_pos)
    }

    /// Convert a local tree position to global space.
    #[inline]
    pub fn to_global(&self, local_pos: DVec3) -> DVec3 {
        self.transform.transform_point3(local_pos)
    }

    /// Path search between two global positions on the published tree.
    pub fn find_path(&self, from: DVec3, to: DVec3, limits: SearchLimits) -> Result<Path, PathError> {
        self.tree.find_path_with(self.to_local(from), self.to_local(to), limits)
    }

    /// Global-space waypoints of `path`.
    pub fn global_waypoints<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = DVec3> + 'a {
        path.waypoints().map(move |c| self.to_global(c.as_dvec3()))
    }
}

impl<T: OccupancyTester + Send + Sync + ?Sized + 'static> NavWorld<T> {
    /// Start a background rebuild with the current config and tester.
    ///
    /// Returns `false` if one is already running.
    pub fn start_rebuild(&mut self) -> bool {
        self.rebuild.start(RebuildRequest {
            world_id: self.id,
            tree: NavOctree::new_unchecked(self.config),
            tester: Arc::clone(&self.tester),
        })
    }

    /// Publish a finished background rebuild, if there is one.
    pub fn poll_rebuild(&mut self) -> Option<BuildStats> {
        let result = self.rebuild.poll()?;
        if result.world_id != self.id {
            debug!(
                expected = self.id.raw(),
                got = result.world_id.raw(),
                "Dropping rebuild for another world"
            );
            return None;
        }
        self.tree = Arc::new(result.tree);
        Some(result.stats)
    }
}
