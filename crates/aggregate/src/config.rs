// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::HashTableImpl;

/// How grouped aggregation distributes work across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationMode {
	/// Every worker upserts into one concurrent grouping table.
	#[default]
	Shared,
	/// Every worker fills a private table; the tables are merged at the end.
	Partitioned,
}

/// Configuration for an [`AggregationOperator`](crate::AggregationOperator).
#[derive(Debug, Clone)]
pub struct AggregationConfig {
	/// Worker threads in the compute pool. `0` means one per CPU.
	pub workers: usize,
	pub mode: AggregationMode,
	/// Initial capacity hint for grouping tables.
	pub estimated_groups: usize,
	/// Shard strategy; derived from `mode` when not set.
	pub hash_table: Option<HashTableImpl>,
}

impl Default for AggregationConfig {
	fn default() -> Self {
		Self {
			workers: 0,
			mode: AggregationMode::default(),
			estimated_groups: 1024,
			hash_table: None,
		}
	}
}

impl AggregationConfig {
	pub fn workers(mut self, workers: usize) -> Self {
		self.workers = workers;
		self
	}

	pub fn mode(mut self, mode: AggregationMode) -> Self {
		self.mode = mode;
		self
	}

	pub fn estimated_groups(mut self, estimated_groups: usize) -> Self {
		self.estimated_groups = estimated_groups;
		self
	}

	pub fn hash_table(mut self, hash_table: HashTableImpl) -> Self {
		self.hash_table = Some(hash_table);
		self
	}

	pub fn hash_table_impl(&self) -> HashTableImpl {
		self.hash_table.unwrap_or(match self.mode {
			AggregationMode::Shared => HashTableImpl::Sharded,
			AggregationMode::Partitioned => HashTableImpl::Compact,
		})
	}
}

#[cfg(test)]
mod tests {
	use crate::{AggregationConfig, AggregationMode, HashTableImpl};

	#[test]
	fn test_hash_table_follows_mode() {
		let config = AggregationConfig::default();
		assert_eq!(config.workers, 0);
		assert_eq!(config.mode, AggregationMode::Shared);
		assert_eq!(config.hash_table_impl(), HashTableImpl::Sharded);

		let config = config.mode(AggregationMode::Partitioned);
		assert_eq!(config.hash_table_impl(), HashTableImpl::Compact);
	}

	#[test]
	fn test_explicit_hash_table_wins() {
		let config = AggregationConfig::default().mode(AggregationMode::Partitioned).hash_table(HashTableImpl::Sharded);
		assert_eq!(config.hash_table_impl(), HashTableImpl::Sharded);
	}

	#[test]
	fn test_builder() {
		let config = AggregationConfig::default().workers(3).estimated_groups(16);
		assert_eq!(config.workers, 3);
		assert_eq!(config.estimated_groups, 16);
	}
}
