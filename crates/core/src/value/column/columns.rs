// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::{Deref, Index};

use reifydb_type::Value;

use crate::value::column::{Column, ColumnData};

/// A batch of equally long columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
	columns: Vec<Column>,
}

impl Deref for Columns {
	type Target = [Column];

	fn deref(&self) -> &Self::Target {
		&self.columns
	}
}

impl Index<usize> for Columns {
	type Output = Column;

	fn index(&self, index: usize) -> &Self::Output {
		&self.columns[index]
	}
}

impl Columns {
	pub fn new(columns: Vec<Column>) -> Self {
		let n = columns.first().map_or(0, |c| c.data().len());
		assert!(columns.iter().all(|c| c.data().len() == n));

		Self {
			columns,
		}
	}

	pub fn empty() -> Self {
		Self {
			columns: Vec::new(),
		}
	}

	pub fn single_row<'b>(rows: impl IntoIterator<Item = (&'b str, Value)>) -> Self {
		let columns = rows
			.into_iter()
			.map(|(name, value)| {
				let data = ColumnData::from_values(value.get_type(), [value]);
				Column::new(name, data)
			})
			.collect();

		Self::new(columns)
	}

	pub fn row_count(&self) -> usize {
		self.columns.first().map_or(0, |c| c.data().len())
	}

	pub fn column_count(&self) -> usize {
		self.columns.len()
	}

	pub fn get_value(&self, row: usize, column: usize) -> Value {
		self.columns[column].data().get_value(row)
	}

	/// Values of one row, in column order.
	pub fn get_row(&self, row: usize) -> Vec<Value> {
		self.columns.iter().map(|c| c.data().get_value(row)).collect()
	}

	pub fn into_inner(self) -> Vec<Column> {
		self.columns
	}
}
