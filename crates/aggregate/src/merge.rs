// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::{debug, instrument};

use crate::{AggregationHandle, GroupingHashTable};

/// Merges every group of `source` into `destination`, for all co-located
/// `handles` at once. Groups absent from `destination` are copied whole.
///
/// Both tables must have been built for the same handles, in the same order.
#[instrument(name = "aggregate::merge_group_by_hash_tables", level = "trace", skip_all)]
pub fn merge_group_by_hash_tables(
	handles: &[&AggregationHandle],
	source: &GroupingHashTable,
	destination: &GroupingHashTable,
) {
	assert_eq!(source.layout(), destination.layout(), "grouping tables have different payload layouts");
	debug_assert_eq!(handles.len(), destination.layout().len());

	let layout = destination.layout();
	let (source_groups, destination_groups) = (source.len(), destination.len());

	for (key, entry) in source.entries() {
		let bytes = entry.snapshot();
		destination.merge_entry(key, 0..layout.total_size(), &bytes, |source, destination| {
			for (position, handle) in handles.iter().enumerate() {
				let region = layout.region(position);
				handle.merge_states_fast(&source[region.clone()], &mut destination[region]);
			}
		});
	}

	debug!(source_groups, destination_groups, merged_groups = destination.len(), "grouping tables merged");
}

#[cfg(test)]
mod tests {
	use reifydb_core::GroupKey;
	use reifydb_type::{Type, Value};

	use crate::{AggregateFunction, AggregationHandle, GroupingHashTable, HashTableImpl, merge_group_by_hash_tables};

	#[test]
	fn test_merges_every_handle() {
		let sum = AggregationHandle::new(AggregateFunction::Sum, &[Type::Int4]).unwrap();
		let max = AggregationHandle::new(AggregateFunction::Max, &[Type::Int4]).unwrap();
		let handles = [&sum, &max];

		let left = GroupingHashTable::new(HashTableImpl::Compact, &[Type::Int4], 4, &handles);
		let right = GroupingHashTable::new(HashTableImpl::Compact, &[Type::Int4], 4, &handles);

		let feed = |table: &GroupingHashTable, group: i32, value: i32| {
			table.upsert_with(GroupKey::from([Value::Int4(group)]), |payload| {
				sum.iterate_payload(&[Value::Int4(value)], &mut payload[table.region(0)]);
				max.iterate_payload(&[Value::Int4(value)], &mut payload[table.region(1)]);
			});
		};

		feed(&left, 1, 3);
		feed(&left, 1, 8);
		feed(&right, 1, 5);
		feed(&right, 2, -1);

		merge_group_by_hash_tables(&handles, &right, &left);

		assert_eq!(left.len(), 2);
		let one = GroupKey::from([Value::Int4(1)]);
		let two = GroupKey::from([Value::Int4(2)]);
		assert_eq!(sum.finalize_hash_table_entry(&left, &one, 0), Some(Value::Int8(16)));
		assert_eq!(max.finalize_hash_table_entry(&left, &one, 1), Some(Value::Int4(8)));
		assert_eq!(sum.finalize_hash_table_entry(&left, &two, 0), Some(Value::Int8(-1)));
		assert_eq!(max.finalize_hash_table_entry(&left, &two, 1), Some(Value::Int4(-1)));

		// the source is left untouched
		assert_eq!(sum.finalize_hash_table_entry(&right, &one, 0), Some(Value::Int8(5)));
	}

	#[test]
	#[should_panic(expected = "different payload layouts")]
	fn test_layout_mismatch() {
		let sum = AggregationHandle::new(AggregateFunction::Sum, &[Type::Int4]).unwrap();
		let count = AggregationHandle::new(AggregateFunction::CountStar, &[]).unwrap();

		let left = sum.create_group_by_hash_table(HashTableImpl::Compact, &[], 1);
		let right = GroupingHashTable::new(HashTableImpl::Compact, &[], 1, &[&sum, &count]);

		merge_group_by_hash_tables(&[&sum], &right, &left);
	}
}
