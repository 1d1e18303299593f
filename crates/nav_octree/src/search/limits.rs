//! Bounds on a single path search.
//!
//! The search itself has no natural bound: an unreachable goal makes it scan
//! the whole connected component around the start. Callers that need bounded
//! latency cap expansions, wall time, or both.

use std::time::Duration;

/// Expansion and time caps for one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
	/// Maximum frontier pops that expand neighbours (0 = unlimited).
	pub max_expansions: usize,
	/// Wall-clock budget for the whole search.
	pub time_budget: Option<Duration>,
}

impl SearchLimits {
	/// Every expansion between the deadline checks.
	pub const TIME_CHECK_INTERVAL: usize = 64;

	/// Reasonable per-frame cap for agents.
	pub const DEFAULT: Self = Self {
		max_expansions: 65_536,
		time_budget: None,
	};

	/// No caps at all.
	pub const UNLIMITED: Self = Self {
		max_expansions: 0,
		time_budget: None,
	};

	/// Cap only the number of expansions.
	pub const fn expansions(max_expansions: usize) -> Self {
		Self {
			max_expansions,
			time_budget: None,
		}
	}

	/// Cap only wall time.
	pub const fn time(budget: Duration) -> Self {
		Self {
			max_expansions: 0,
			time_budget: Some(budget),
		}
	}

	/// Check if another expansion is allowed.
	#[inline]
	pub fn can_expand(&self, performed: usize) -> bool {
		self.max_expansions == 0 || performed < self.max_expansions
	}

	/// Check if `performed` expansions is a deadline checkpoint.
	#[inline]
	pub fn should_check_time(&self, performed: usize) -> bool {
		self.time_budget.is_some() && performed % Self::TIME_CHECK_INTERVAL == 0
	}
}

impl Default for SearchLimits {
	fn default() -> Self {
		Self::DEFAULT
	}
}
