// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_aggregate::{
	AggregateFunction, AggregationHandle, DistinctTable, GroupingHashTable, HashTableImpl,
	merge_group_by_hash_tables,
};
use reifydb_core::{ColumnData, ColumnsAccessor, GroupKey};
use reifydb_testing::{batch::columns, tracing};
use reifydb_type::{Type, Value};

fn key(name: &str) -> GroupKey {
	GroupKey::from([Value::utf8(name)])
}

fn avg_table(handle: &AggregationHandle, rows: &[(&str, i64)]) -> GroupingHashTable {
	let table = handle.create_group_by_hash_table(HashTableImpl::Compact, &[Type::Utf8], 4);
	for (group, value) in rows {
		table.upsert_with(key(group), |payload| handle.iterate_payload(&[Value::Int8(*value)], payload));
	}
	table
}

fn sum_and_count(handle: &AggregationHandle, table: &GroupingHashTable, group: &str) -> Vec<Value> {
	let entry = table.find(&key(group)).unwrap();
	let payload = entry.lock();
	let layout = handle.payload_layout();
	(0..layout.fields().len()).map(|field| layout.get_value(&payload, field)).collect()
}

#[test]
fn test_merge_two_grouping_tables() {
	tracing::init();

	let handle = AggregationHandle::new(AggregateFunction::Avg, &[Type::Int8]).unwrap();

	// x -> (sum 10, count 2)
	let a = avg_table(&handle, &[("x", 4), ("x", 6)]);
	// x -> (sum 5, count 1), y -> (sum 7, count 1)
	let b = avg_table(&handle, &[("x", 5), ("y", 7)]);

	handle.merge_group_by_hash_tables(&b, &a, 0);

	assert_eq!(a.len(), 2);
	assert_eq!(sum_and_count(&handle, &a, "x"), vec![Value::Int8(15), Value::Int8(3)]);
	assert_eq!(sum_and_count(&handle, &a, "y"), vec![Value::Int8(7), Value::Int8(1)]);

	let mut keys = vec![key("x"), key("y")];
	let column = handle.finalize_hash_table(&a, &mut keys, 0);
	assert_eq!(column, ColumnData::float8([5.0, 7.0]));
}

#[test]
fn test_merge_direction_does_not_matter() {
	let handle = AggregationHandle::new(AggregateFunction::Avg, &[Type::Int8]).unwrap();

	let a = avg_table(&handle, &[("x", 4), ("x", 6)]);
	let b = avg_table(&handle, &[("x", 5), ("y", 7)]);
	handle.merge_group_by_hash_tables(&a, &b, 0);

	let mut keys = vec![key("x"), key("y")];
	assert_eq!(handle.finalize_hash_table(&b, &mut keys, 0), ColumnData::float8([5.0, 7.0]));
}

#[test]
fn test_merge_co_located_handles() {
	let sum = AggregationHandle::new(AggregateFunction::Sum, &[Type::Int8]).unwrap();
	let count = AggregationHandle::new(AggregateFunction::CountStar, &[]).unwrap();
	let handles = [&sum, &count];

	let build = |rows: &[(&str, i64)]| {
		let table = GroupingHashTable::new(HashTableImpl::Sharded, &[Type::Utf8], 4, &handles);
		for (group, value) in rows {
			table.upsert_with(key(group), |payload| {
				sum.iterate_payload(&[Value::Int8(*value)], &mut payload[table.region(0)]);
				count.iterate_payload(&[], &mut payload[table.region(1)]);
			});
		}
		table
	};

	let a = build(&[("x", 1), ("z", 2)]);
	let b = build(&[("x", 3), ("y", 4), ("y", 5)]);
	merge_group_by_hash_tables(&handles, &b, &a);

	let mut keys = vec![key("x"), key("y"), key("z")];
	assert_eq!(sum.finalize_hash_table(&a, &mut keys, 0), ColumnData::int8([4, 9, 2]));
	assert_eq!(count.finalize_hash_table(&a, &mut keys, 1), ColumnData::int8([2, 2, 1]));
}

#[test]
fn test_distinct_avg_single() {
	tracing::init();

	let handle = AggregationHandle::new(AggregateFunction::Avg, &[Type::Int4]).unwrap();
	let input = columns([("v", ColumnData::int4([1, 1, 2, 2, 3]))]);

	let distinct = DistinctTable::default();
	distinct.insert_value_accessor(&mut ColumnsAccessor::new(&input), &[0], &[]);
	assert_eq!(distinct.len(), 3);

	let state = handle.aggregate_on_distinctify_hash_table_for_single(&distinct);
	assert_eq!(handle.finalize(&state), Value::float8(2.0));
}

#[test]
fn test_distinct_count_group_by() {
	let handle = AggregationHandle::new(AggregateFunction::Count, &[Type::Int4]).unwrap();
	let input = columns([
		("g", ColumnData::utf8(["a", "a", "a", "b", "b", "c"])),
		("v", ColumnData::int4_optional([Some(1), Some(1), Some(2), Some(5), Some(5), None])),
	]);

	let distinct = DistinctTable::default();
	distinct.insert_value_accessor(&mut ColumnsAccessor::new(&input), &[1], &[0]);

	let table = handle.create_group_by_hash_table(HashTableImpl::Sharded, &[Type::Utf8], 4);
	handle.aggregate_on_distinctify_hash_table_for_group_by(&distinct, &table, 0);

	let mut keys = vec![key("a"), key("b"), key("c")];
	assert_eq!(handle.finalize_hash_table(&table, &mut keys, 0), ColumnData::int8([2, 1, 0]));
}

#[test]
fn test_accessor_into_hash_table_matches_per_group_iterate() {
	let handle = AggregationHandle::new(AggregateFunction::Sum, &[Type::Float8]).unwrap();
	let input = columns([
		("g", ColumnData::int4([1, 2, 1, 2, 3])),
		("v", ColumnData::float8_optional([Some(0.5), Some(1.25), Some(-2.0), None, None])),
	]);

	let table = handle.create_group_by_hash_table(HashTableImpl::Sharded, &[Type::Int4], 4);
	handle.aggregate_value_accessor_into_hash_table(&mut ColumnsAccessor::new(&input), &[1], &[0], &table, 0);

	let group = |g: i32| GroupKey::from([Value::Int4(g)]);
	assert_eq!(handle.finalize_hash_table_entry(&table, &group(1), 0), Some(Value::float8(-1.5)));
	assert_eq!(handle.finalize_hash_table_entry(&table, &group(2), 0), Some(Value::float8(1.25)));
	// a group seen only with nulls exists but sums to undefined
	assert_eq!(handle.finalize_hash_table_entry(&table, &group(3), 0), Some(Value::Undefined));
}
