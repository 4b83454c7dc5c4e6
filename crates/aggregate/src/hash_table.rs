// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Range, sync::Arc};

use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};
use reifydb_core::GroupKey;
use reifydb_runtime::hash::Xxh3BuildHasher;
use reifydb_type::Type;
use tracing::trace;

use crate::{AggregateLayout, AggregationHandle};

/// Shard strategy of a [`GroupingHashTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashTableImpl {
	/// Many shards; for tables shared by every worker.
	#[default]
	Sharded,
	/// Few shards; for tables private to one worker.
	Compact,
}

const COMPACT_SHARDS: usize = 2;

/// One group's payload. The mutex is the group's only lock.
#[derive(Debug)]
pub struct GroupEntry {
	payload: Mutex<Vec<u8>>,
}

impl GroupEntry {
	fn new(payload: Vec<u8>) -> Self {
		Self {
			payload: Mutex::new(payload),
		}
	}

	pub fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
		self.payload.lock()
	}

	pub fn snapshot(&self) -> Vec<u8> {
		self.payload.lock().clone()
	}
}

/// Maps group keys to flat payload buffers holding the state of one or more
/// co-located aggregation handles.
///
/// Shard locks are only held while looking up or inserting an entry, never
/// while a payload is locked.
pub struct GroupingHashTable {
	map: DashMap<GroupKey, Arc<GroupEntry>, Xxh3BuildHasher>,
	key_types: Vec<Type>,
	layout: AggregateLayout,
	initial: Vec<u8>,
}

impl GroupingHashTable {
	pub fn new(
		implementation: HashTableImpl,
		key_types: &[Type],
		estimated_groups: usize,
		handles: &[&AggregationHandle],
	) -> Self {
		let layout = AggregateLayout::from_handles(handles);

		let mut initial = vec![0u8; layout.total_size()];
		for (position, handle) in handles.iter().enumerate() {
			handle.init_payload(&mut initial[layout.region(position)]);
		}

		let map = match implementation {
			HashTableImpl::Sharded => DashMap::with_capacity_and_hasher(estimated_groups, Xxh3BuildHasher),
			HashTableImpl::Compact => DashMap::with_capacity_and_hasher_and_shard_amount(
				estimated_groups,
				Xxh3BuildHasher,
				COMPACT_SHARDS,
			),
		};

		trace!(?implementation, estimated_groups, payload_size = layout.total_size(), "grouping hash table created");

		Self {
			map,
			key_types: key_types.to_vec(),
			layout,
			initial,
		}
	}

	/// Returns the entry for `key`, creating it with every handle's initial
	/// state if it does not exist. Concurrent upserts of the same key create
	/// exactly one entry; the first insert wins.
	pub fn upsert(&self, key: GroupKey) -> Arc<GroupEntry> {
		if let Some(entry) = self.map.get(&key) {
			return Arc::clone(entry.value());
		}

		let entry = self.map.entry(key).or_insert_with(|| Arc::new(GroupEntry::new(self.initial.clone())));
		Arc::clone(entry.value())
	}

	/// Upserts `key` and runs `f` on its whole payload under the group lock.
	pub fn upsert_with<R>(&self, key: GroupKey, f: impl FnOnce(&mut [u8]) -> R) -> R {
		let entry = self.upsert(key);
		let mut payload = entry.lock();
		f(&mut payload)
	}

	pub fn find(&self, key: &GroupKey) -> Option<Arc<GroupEntry>> {
		self.map.get(key).map(|entry| Arc::clone(entry.value()))
	}

	/// Inserts a copy of `source` into `region` of a fresh entry when `key` is
	/// absent. Otherwise calls `merge` with `source` and the existing region,
	/// under the group lock.
	pub fn merge_entry(
		&self,
		key: GroupKey,
		region: Range<usize>,
		source: &[u8],
		merge: impl FnOnce(&[u8], &mut [u8]),
	) {
		let mut inserted = false;
		let entry = {
			let entry = self.map.entry(key).or_insert_with(|| {
				inserted = true;
				let mut payload = self.initial.clone();
				payload[region.clone()].copy_from_slice(source);
				Arc::new(GroupEntry::new(payload))
			});
			Arc::clone(entry.value())
		};

		if !inserted {
			let mut payload = entry.lock();
			merge(source, &mut payload[region]);
		}
	}

	/// A point-in-time list of all entries, in enumeration order.
	pub fn entries(&self) -> Vec<(GroupKey, Arc<GroupEntry>)> {
		self.map.iter().map(|entry| (entry.key().clone(), Arc::clone(entry.value()))).collect()
	}

	/// Visits every group with its locked payload.
	pub fn for_each(&self, mut f: impl FnMut(&GroupKey, &[u8])) {
		for (key, entry) in self.entries() {
			let payload = entry.lock();
			f(&key, &payload);
		}
	}

	pub fn keys(&self) -> Vec<GroupKey> {
		self.map.iter().map(|entry| entry.key().clone()).collect()
	}

	pub fn len(&self) -> usize {
		self.map.len()
	}

	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}

	pub fn key_types(&self) -> &[Type] {
		&self.key_types
	}

	pub fn layout(&self) -> &AggregateLayout {
		&self.layout
	}

	/// The byte range of the handle co-located at `position`.
	pub fn region(&self, position: usize) -> Range<usize> {
		self.layout.region(position)
	}
}
