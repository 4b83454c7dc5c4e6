// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Normalisation of aggregation output, whose row order is not defined.

use std::cmp::Ordering;

use reifydb_core::Columns;
use reifydb_type::Value;

/// All rows of `columns`, sorted. Undefined sorts first.
pub fn sorted_rows(columns: &Columns) -> Vec<Vec<Value>> {
	let mut rows: Vec<Vec<Value>> = (0..columns.row_count()).map(|row| columns.get_row(row)).collect();
	rows.sort_by(|l, r| compare_rows(l, r));
	rows
}

pub fn compare_rows(l: &[Value], r: &[Value]) -> Ordering {
	l.iter().zip(r).map(|(l, r)| compare_values(l, r)).find(|o| o.is_ne()).unwrap_or(l.len().cmp(&r.len()))
}

pub fn compare_values(l: &Value, r: &Value) -> Ordering {
	match (l.is_undefined(), r.is_undefined()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Less,
		(false, true) => Ordering::Greater,
		(false, false) => l.compare(r).unwrap_or_else(|| l.get_type().cmp(&r.get_type())),
	}
}

#[cfg(test)]
mod tests {
	use reifydb_core::ColumnData;
	use reifydb_type::Value;

	use super::*;
	use crate::batch::columns;

	#[test]
	fn test_sorted_rows() {
		let input = columns([
			("k", ColumnData::utf8_optional([Some("y"), None, Some("x")])),
			("v", ColumnData::int8([1, 2, 3])),
		]);

		assert_eq!(
			sorted_rows(&input),
			vec![
				vec![Value::Undefined, Value::Int8(2)],
				vec![Value::utf8("x"), Value::Int8(3)],
				vec![Value::utf8("y"), Value::Int8(1)],
			]
		);
	}

	#[test]
	fn test_numbers_compare_across_types() {
		assert_eq!(compare_values(&Value::Int4(2), &Value::float8(2.5)), Ordering::Less);
	}
}
