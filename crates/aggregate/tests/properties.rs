// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Behavioural properties every aggregation handle must satisfy.

use reifydb_aggregate::{AggregateFunction, AggregationHandle};
use reifydb_core::ColumnData;
use reifydb_testing::tracing;
use reifydb_type::{Type, Value};

fn handles() -> Vec<AggregationHandle> {
	let mut handles = Vec::new();
	for ty in [Type::Int4, Type::Float8] {
		for function in [
			AggregateFunction::Sum,
			AggregateFunction::Avg,
			AggregateFunction::Count,
			AggregateFunction::Min,
			AggregateFunction::Max,
		] {
			handles.push(AggregationHandle::new(function, &[ty]).unwrap());
		}
	}
	handles.push(AggregationHandle::new(AggregateFunction::CountStar, &[]).unwrap());
	handles
}

fn values(ty: Type) -> Vec<Value> {
	let raw = [Some(4), None, Some(-7), Some(12), Some(0), None, Some(3), Some(12), Some(-1)];
	raw.into_iter()
		.map(|v| match (v, ty) {
			(None, _) => Value::Undefined,
			(Some(v), Type::Int4) => Value::Int4(v),
			(Some(v), _) => Value::float8(v as f64 * 0.5),
		})
		.collect()
}

fn arguments<'a>(handle: &AggregationHandle, value: &'a Value) -> &'a [Value] {
	if handle.function().arity() == 0 {
		&[]
	} else {
		std::slice::from_ref(value)
	}
}

fn iterate_all(handle: &AggregationHandle, values: &[Value]) -> Value {
	let state = handle.create_initial_state();
	for value in values {
		handle.iterate(&state, arguments(handle, value));
	}
	handle.finalize(&state)
}

fn iterate_payload_all(handle: &AggregationHandle, values: &[Value]) -> Value {
	let mut payload = handle.payload_layout().allocate();
	handle.init_payload(&mut payload);
	for value in values {
		handle.iterate_payload(arguments(handle, value), &mut payload);
	}
	handle.finalize_hash_table_entry_fast(&payload)
}

#[test]
fn test_bulk_matches_iterate() {
	tracing::init();

	for handle in handles() {
		let values = values(handle.argument_type());
		let expected = iterate_all(&handle, &values);

		let bulk = if handle.function().arity() == 0 {
			handle.accumulate_nullary(values.len())
		} else {
			let column = ColumnData::from_values(handle.argument_type(), values.iter().cloned());
			handle.accumulate_column_vectors(&[&column])
		};

		assert_eq!(handle.finalize(&bulk), expected, "{} over {}", handle.function(), handle.argument_type());
	}
}

#[test]
fn test_merge_of_any_split_matches_whole() {
	tracing::init();

	for handle in handles() {
		let values = values(handle.argument_type());
		let expected = iterate_all(&handle, &values);

		for split in 0..=values.len() {
			let (left, right) = values.split_at(split);

			let destination = handle.create_initial_state();
			let source = handle.create_initial_state();
			for value in left {
				handle.iterate(&destination, arguments(&handle, value));
			}
			for value in right {
				handle.iterate(&source, arguments(&handle, value));
			}
			handle.merge_states(&source, &destination);

			assert_eq!(handle.finalize(&destination), expected, "{} split at {split}", handle.function());
		}
	}
}

#[test]
fn test_merge_is_commutative() {
	for handle in handles() {
		let values = values(handle.argument_type());
		let (left, right) = values.split_at(4);

		let run = |first: &[Value], second: &[Value]| {
			let destination = handle.create_initial_state();
			let source = handle.create_initial_state();
			for value in first {
				handle.iterate(&destination, arguments(&handle, value));
			}
			for value in second {
				handle.iterate(&source, arguments(&handle, value));
			}
			handle.merge_states(&source, &destination);
			handle.finalize(&destination)
		};

		assert_eq!(run(left, right), run(right, left), "{}", handle.function());
	}
}

#[test]
fn test_flat_payload_matches_boxed_state() {
	tracing::init();

	for handle in handles() {
		let values = values(handle.argument_type());
		assert_eq!(
			iterate_payload_all(&handle, &values),
			iterate_all(&handle, &values),
			"{} over {}",
			handle.function(),
			handle.argument_type()
		);

		let empty: [Value; 0] = [];
		assert_eq!(iterate_payload_all(&handle, &empty), iterate_all(&handle, &empty));
	}
}

#[test]
fn test_flat_merge_matches_boxed_merge() {
	for handle in handles() {
		let values = values(handle.argument_type());
		let (left, right) = values.split_at(5);

		let mut destination = handle.payload_layout().allocate();
		let mut source = handle.payload_layout().allocate();
		handle.init_payload(&mut destination);
		handle.init_payload(&mut source);
		for value in left {
			handle.iterate_payload(arguments(&handle, value), &mut destination);
		}
		for value in right {
			handle.iterate_payload(arguments(&handle, value), &mut source);
		}
		handle.merge_states_fast(&source, &mut destination);

		assert_eq!(handle.finalize_hash_table_entry_fast(&destination), iterate_all(&handle, &values));
	}
}

#[test]
fn test_avg_of_nothing_is_undefined() {
	let handle = AggregationHandle::new(AggregateFunction::Avg, &[Type::Int4]).unwrap();

	assert_eq!(iterate_all(&handle, &[]), Value::Undefined);
	assert_eq!(iterate_all(&handle, &[Value::Undefined, Value::Undefined]), Value::Undefined);
	assert_eq!(iterate_payload_all(&handle, &[Value::Undefined]), Value::Undefined);
}

#[test]
fn test_avg_of_two_four_six_is_four() {
	let handle = AggregationHandle::new(AggregateFunction::Avg, &[Type::Int4]).unwrap();
	let values = [Value::Int4(2), Value::Int4(4), Value::Int4(6)];

	assert_eq!(iterate_all(&handle, &values), Value::float8(4.0));
	assert_eq!(iterate_payload_all(&handle, &values), Value::float8(4.0));
}

#[test]
fn test_avg_of_zeros_is_zero() {
	let handle = AggregationHandle::new(AggregateFunction::Avg, &[Type::Float8]).unwrap();
	assert_eq!(iterate_all(&handle, &[Value::float8(0.0)]), Value::float8(0.0));
}

#[test]
fn test_count_of_nothing_is_zero() {
	let handle = AggregationHandle::new(AggregateFunction::Count, &[Type::Utf8]).unwrap();
	assert_eq!(iterate_all(&handle, &[Value::Undefined]), Value::Int8(0));
}
