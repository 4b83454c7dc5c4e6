// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use dashmap::DashSet;
use reifydb_core::{ColumnId, GroupKey, ValueAccessor};
use reifydb_runtime::hash::Xxh3BuildHasher;
use reifydb_type::Value;
use smallvec::SmallVec;
use tracing::instrument;

/// One unique (group, arguments) combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistinctKey {
	pub group: GroupKey,
	pub arguments: SmallVec<[Value; 2]>,
}

/// Deduplicates aggregate arguments, per group, before they reach the
/// handle that accumulates them. Workers may insert concurrently.
#[derive(Debug)]
pub struct DistinctTable {
	set: DashSet<DistinctKey, Xxh3BuildHasher>,
}

impl Default for DistinctTable {
	fn default() -> Self {
		Self::new(0)
	}
}

impl DistinctTable {
	pub fn new(estimated_entries: usize) -> Self {
		Self {
			set: DashSet::with_capacity_and_hasher(estimated_entries, Xxh3BuildHasher),
		}
	}

	/// Returns true if the combination was not present before.
	pub fn insert(&self, group: GroupKey, arguments: &[Value]) -> bool {
		self.set.insert(DistinctKey {
			group,
			arguments: arguments.iter().cloned().collect(),
		})
	}

	/// Inserts the (group key, arguments) combination of every row.
	#[instrument(name = "aggregate::distinct::insert_value_accessor", level = "trace", skip_all)]
	pub fn insert_value_accessor<A: ValueAccessor + ?Sized>(
		&self,
		accessor: &mut A,
		argument_ids: &[ColumnId],
		group_by_ids: &[ColumnId],
	) {
		let mut group = Vec::with_capacity(group_by_ids.len());
		let mut arguments = Vec::with_capacity(argument_ids.len());

		accessor.reset();
		while accessor.next() {
			accessor.gather(group_by_ids, &mut group);
			accessor.gather(argument_ids, &mut arguments);
			self.insert(GroupKey::from(group.as_slice()), &arguments);
		}
	}

	/// A point-in-time list of the unique combinations.
	pub fn keys(&self) -> Vec<DistinctKey> {
		self.set.iter().map(|key| key.key().clone()).collect()
	}

	pub fn for_each(&self, mut f: impl FnMut(&DistinctKey)) {
		for key in self.keys() {
			f(&key);
		}
	}

	pub fn len(&self) -> usize {
		self.set.len()
	}

	pub fn is_empty(&self) -> bool {
		self.set.is_empty()
	}
}
