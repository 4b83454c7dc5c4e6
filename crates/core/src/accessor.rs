// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_type::{Error, Type, Value};

use crate::Columns;

/// Position of a column inside the input the accessor reads from.
pub type ColumnId = usize;

/// Row cursor over one finite input batch.
///
/// The cursor starts before the first row; `next` must be called before the
/// first `get`. `reset` rewinds it so the same batch can be read again.
pub trait ValueAccessor {
	fn next(&mut self) -> bool;

	fn reset(&mut self);

	fn get(&self, column: ColumnId) -> Value;

	fn row_count(&self) -> usize;

	fn column_count(&self) -> usize;

	fn column_type(&self, column: ColumnId) -> Type;

	/// Reads several columns of the current row into `out`, replacing its
	/// contents.
	fn gather(&self, columns: &[ColumnId], out: &mut Vec<Value>) {
		out.clear();
		out.extend(columns.iter().map(|&c| self.get(c)));
	}

	fn validate_columns(&self, columns: &[ColumnId]) -> reifydb_type::Result<()> {
		let width = self.column_count();
		match columns.iter().find(|&&c| c >= width) {
			Some(&column) => Err(Error::UnknownColumn {
				column,
				width,
			}),
			None => Ok(()),
		}
	}
}

pub struct ColumnsAccessor<'a> {
	columns: &'a Columns,
	row: Option<usize>,
}

impl<'a> ColumnsAccessor<'a> {
	pub fn new(columns: &'a Columns) -> Self {
		Self {
			columns,
			row: None,
		}
	}

	pub fn position(&self) -> Option<usize> {
		self.row
	}
}

impl ValueAccessor for ColumnsAccessor<'_> {
	fn next(&mut self) -> bool {
		let next = self.row.map_or(0, |r| r + 1);
		if next < self.columns.row_count() {
			self.row = Some(next);
			true
		} else {
			self.row = Some(self.columns.row_count());
			false
		}
	}

	fn reset(&mut self) {
		self.row = None;
	}

	fn get(&self, column: ColumnId) -> Value {
		match self.row {
			Some(row) if row < self.columns.row_count() => self.columns.get_value(row, column),
			_ => panic!("accessor is not positioned on a row"),
		}
	}

	fn row_count(&self) -> usize {
		self.columns.row_count()
	}

	fn column_count(&self) -> usize {
		self.columns.column_count()
	}

	fn column_type(&self, column: ColumnId) -> Type {
		self.columns[column].get_type()
	}
}
