// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Builders for input batches.

use reifydb_core::{Column, ColumnData, Columns};

pub fn columns<'a>(columns: impl IntoIterator<Item = (&'a str, ColumnData)>) -> Columns {
	Columns::new(columns.into_iter().map(|(name, data)| Column::new(name, data)).collect())
}

/// Cuts `columns` into consecutive batches of at most `rows` rows.
pub fn split(columns: &Columns, rows: usize) -> Vec<Columns> {
	assert!(rows > 0);

	(0..columns.row_count())
		.step_by(rows)
		.map(|start| {
			let end = (start + rows).min(columns.row_count());
			slice(columns, start, end)
		})
		.collect()
}

/// Rows `start..end` of `columns` as a new batch.
pub fn slice(columns: &Columns, start: usize, end: usize) -> Columns {
	Columns::new(
		columns.iter()
			.map(|c| {
				let data = ColumnData::from_values(c.get_type(), (start..end).map(|row| c.get_value(row)));
				Column::new(c.name(), data)
			})
			.collect(),
	)
}
