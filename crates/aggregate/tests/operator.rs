// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_aggregate::{AggregateExpr, AggregateFunction, AggregationConfig, AggregationMode, AggregationOperator};
use reifydb_core::{ColumnData, Columns};
use reifydb_testing::{
	batch::{columns, split},
	result::sorted_rows,
	tracing,
};
use reifydb_type::{Type, Value};

fn input() -> Columns {
	columns([
		("region", ColumnData::utf8(["eu", "us", "eu", "ap", "us", "eu", "us", "eu"])),
		("amount", ColumnData::int4_optional([Some(10), Some(5), None, Some(7), Some(5), Some(30), Some(1), Some(10)])),
	])
}

fn input_types() -> Vec<Type> {
	vec![Type::Utf8, Type::Int4]
}

fn aggregates() -> Vec<AggregateExpr> {
	vec![
		AggregateExpr::new(AggregateFunction::Sum, &[1], "sum"),
		AggregateExpr::new(AggregateFunction::Avg, &[1], "avg"),
		AggregateExpr::new(AggregateFunction::Count, &[1], "count"),
		AggregateExpr::new(AggregateFunction::CountStar, &[], "rows"),
		AggregateExpr::new(AggregateFunction::Min, &[1], "min"),
		AggregateExpr::new(AggregateFunction::Max, &[1], "max"),
		AggregateExpr::new(AggregateFunction::Count, &[1], "distinct_count").distinct(),
	]
}

fn expected_grouped() -> Vec<Vec<Value>> {
	vec![
		vec![
			Value::utf8("ap"),
			Value::Int8(7),
			Value::float8(7.0),
			Value::Int8(1),
			Value::Int8(1),
			Value::Int4(7),
			Value::Int4(7),
			Value::Int8(1),
		],
		vec![
			Value::utf8("eu"),
			Value::Int8(50),
			Value::float8(50.0 / 3.0),
			Value::Int8(3),
			Value::Int8(4),
			Value::Int4(10),
			Value::Int4(30),
			Value::Int8(2),
		],
		vec![
			Value::utf8("us"),
			Value::Int8(11),
			Value::float8(11.0 / 3.0),
			Value::Int8(3),
			Value::Int8(3),
			Value::Int4(1),
			Value::Int4(5),
			Value::Int8(2),
		],
	]
}

fn run(mode: AggregationMode, workers: usize, rows_per_batch: usize) -> Columns {
	let operator = AggregationOperator::new(
		aggregates(),
		vec![0],
		input_types(),
		AggregationConfig::default().workers(workers).mode(mode).estimated_groups(4),
	)
	.unwrap();
	operator.execute(&split(&input(), rows_per_batch)).unwrap()
}

#[test]
fn test_grouped_shared() {
	tracing::init();

	let result = run(AggregationMode::Shared, 4, 3);
	assert_eq!(result.column_count(), 8);
	assert_eq!(result[0].name(), "region");
	assert_eq!(result[7].name(), "distinct_count");
	assert_eq!(sorted_rows(&result), expected_grouped());
}

#[test]
fn test_grouped_partitioned() {
	tracing::init();

	let result = run(AggregationMode::Partitioned, 4, 2);
	assert_eq!(sorted_rows(&result), expected_grouped());
}

#[test]
fn test_batching_does_not_change_result() {
	for rows_per_batch in 1..=8 {
		for mode in [AggregationMode::Shared, AggregationMode::Partitioned] {
			let result = run(mode, 3, rows_per_batch);
			assert_eq!(sorted_rows(&result), expected_grouped(), "{mode:?} with {rows_per_batch} rows per batch");
		}
	}
}

#[test]
fn test_ungrouped() {
	tracing::init();

	let operator = AggregationOperator::new(
		aggregates(),
		vec![],
		input_types(),
		AggregationConfig::default().workers(2),
	)
	.unwrap();

	let result = operator.execute(&split(&input(), 3)).unwrap();
	assert_eq!(result.row_count(), 1);
	assert_eq!(
		result.get_row(0),
		vec![
			Value::Int8(68),
			Value::float8(68.0 / 7.0),
			Value::Int8(7),
			Value::Int8(8),
			Value::Int4(1),
			Value::Int4(30),
			Value::Int8(5),
		]
	);
}

#[test]
fn test_distinct_avg_ungrouped() {
	let operator = AggregationOperator::new(
		vec![AggregateExpr::new(AggregateFunction::Avg, &[0], "avg").distinct()],
		vec![],
		vec![Type::Int4],
		AggregationConfig::default().workers(2),
	)
	.unwrap();

	let input = columns([("v", ColumnData::int4([1, 1, 2, 2, 3]))]);
	let result = operator.execute(&split(&input, 2)).unwrap();
	assert_eq!(result.get_row(0), vec![Value::float8(2.0)]);
}

#[test]
fn test_group_by_without_aggregates() {
	let operator =
		AggregationOperator::new(vec![], vec![0], input_types(), AggregationConfig::default().workers(2)).unwrap();

	let result = operator.execute(&split(&input(), 3)).unwrap();
	assert_eq!(
		sorted_rows(&result),
		vec![vec![Value::utf8("ap")], vec![Value::utf8("eu")], vec![Value::utf8("us")]]
	);
}

#[test]
fn test_grouped_no_input() {
	let result = run(AggregationMode::Shared, 2, 100);
	assert_eq!(result.row_count(), 3);

	let operator = AggregationOperator::new(
		aggregates(),
		vec![0],
		input_types(),
		AggregationConfig::default().workers(2),
	)
	.unwrap();
	let result = operator.execute(&[]).unwrap();
	assert_eq!(result.row_count(), 0);
	assert_eq!(result.column_count(), 8);
}
