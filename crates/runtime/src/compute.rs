// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Compute pool for CPU-bound aggregation work, backed by rayon.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::debug;

/// A dedicated rayon [`ThreadPool`] the aggregation workers run on.
///
/// Cloning is cheap; all clones share the same threads.
#[derive(Clone)]
pub struct ComputePool {
	pool: Arc<ThreadPool>,
}

impl ComputePool {
	/// Creates a pool with `threads` workers. `0` means one per CPU.
	pub fn new(threads: usize) -> Result<Self, ThreadPoolBuildError> {
		let threads = if threads == 0 {
			num_cpus::get()
		} else {
			threads
		};

		let pool = ThreadPoolBuilder::new().num_threads(threads).thread_name(|i| format!("compute-{i}")).build()?;
		debug!(threads, "compute pool started");

		Ok(Self {
			pool: Arc::new(pool),
		})
	}

	/// Executes a closure on the pool. Parallel iterators used inside the
	/// closure run on this pool's threads.
	pub fn install<R, F>(&self, f: F) -> R
	where
		R: Send,
		F: FnOnce() -> R + Send,
	{
		self.pool.install(f)
	}

	pub fn threads(&self) -> usize {
		self.pool.current_num_threads()
	}
}
