//! Background tree rebuilds.
//!
//! Building walks the whole tester and can take a while on deep trees. This
//! runs it on rayon's pool and hands the finished tree back over a channel,
//! so the owning thread keeps answering queries from the previous tree.
//!
//! ```text
//! Owner thread                      rayon
//! ┌──────────────┐
//! │ start()      │──── request ───► ┌─────────────┐
//! └──────────────┘                  │ build()     │
//!                                   └──────┬──────┘
//! ┌──────────────┐                         │
//! │ poll()       │◄──── result ────────────┘
//! │ - publish    │
//! └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut rebuild = AsyncRebuild::new();
//! rebuild.start(RebuildRequest {
//!     world_id,
//!     tree: NavOctree::new(config)?,
//!     tester: Arc::clone(&tester),
//! });
//!
//! // Each frame
//! if let Some(result) = rebuild.poll() {
//!     current = Arc::new(result.tree);
//! }
//! ```

use std::sync::Arc;

use crossbeam_channel::{self as channel, Receiver, TryRecvError};

use crate::octree::{BuildStats, NavOctree};
use crate::tester::OccupancyTester;
use crate::world::WorldId;

/// Request to build a tree in the background.
pub struct RebuildRequest<T: OccupancyTester + ?Sized> {
	/// World the tree belongs to.
	pub world_id: WorldId,
	/// Unbuilt (or stale) tree carrying the configuration to build with.
	pub tree: NavOctree,
	/// Occupancy source, shared with the owner.
	pub tester: Arc<T>,
}

/// Finished background build.
#[derive(Debug)]
pub struct RebuildResult {
	pub world_id: WorldId,
	pub tree: NavOctree,
	pub stats: BuildStats,
}

/// Non-blocking single-slot rebuild runner.
#[derive(Debug)]
pub struct AsyncRebuild {
	/// Receiver for the pending result.
	receiver: Option<Receiver<RebuildResult>>,
}

impl AsyncRebuild {
	pub fn new() -> Self {
		Self { receiver: None }
	}

	/// Check if a build is running.
	pub fn is_busy(&self) -> bool {
		self.receiver.is_some()
	}

	/// Start a background build.
	///
	/// Returns `true` if started, `false` if a build is already running.
	pub fn start<T>(&mut self, request: RebuildRequest<T>) -> bool
	where
		T: OccupancyTester + Send + Sync + ?Sized + 'static,
	{
		if self.is_busy() {
			return false;
		}

		let (sender, receiver) = channel::bounded(1);
		self.receiver = Some(receiver);

		rayon::spawn(move || {
			let RebuildRequest {
				world_id,
				mut tree,
				tester,
			} = request;
			let stats = tree.build(tester.as_ref());
			// Receiver dropped = cancelled
			let _ = sender.send(RebuildResult { world_id, tree, stats });
		});

		true
	}

	/// Poll for the finished tree (non-blocking).
	///
	/// Returns `Some(result)` once, when the build completes.
	pub fn poll(&mut self) -> Option<RebuildResult> {
		let receiver = self.receiver.as_ref()?;

		match receiver.try_recv() {
			Ok(result) => {
				self.receiver = None;
				Some(result)
			}
			Err(TryRecvError::Empty) => None,
			Err(TryRecvError::Disconnected) => {
				self.receiver = None;
				None
			}
		}
	}

	/// Block until the running build finishes.
	pub fn wait(&mut self) -> Option<RebuildResult> {
		let receiver = self.receiver.take()?;
		receiver.recv().ok()
	}

	/// Forget the running build. Its result is dropped when it finishes.
	pub fn cancel(&mut self) {
		self.receiver = None;
	}
}

impl Default for AsyncRebuild {
	fn default() -> Self {
		Self::new()
	}
}
