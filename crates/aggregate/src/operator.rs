// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use rayon::prelude::*;
use reifydb_core::{Column, ColumnData, ColumnId, Columns, ColumnsAccessor, GroupKey, ValueAccessor};
use reifydb_runtime::ComputePool;
use reifydb_type::{Type, Value};
use tracing::{debug, instrument};

use crate::{
	AccumulatorState, AggregateFunction, AggregationConfig, AggregationHandle, AggregationMode, DistinctTable,
	Error, GroupingHashTable, HashTableImpl, merge_group_by_hash_tables,
};

/// One aggregate of an aggregation, e.g. `AVG(DISTINCT price) AS avg_price`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateExpr {
	pub function: AggregateFunction,
	pub arguments: Vec<ColumnId>,
	pub distinct: bool,
	pub name: String,
}

impl AggregateExpr {
	pub fn new(function: AggregateFunction, arguments: &[ColumnId], name: impl Into<String>) -> Self {
		Self {
			function,
			arguments: arguments.to_vec(),
			distinct: false,
			name: name.into(),
		}
	}

	pub fn distinct(mut self) -> Self {
		self.distinct = true;
		self
	}
}

/// Aggregates column batches on a compute pool, optionally grouped.
///
/// Batches are spread over the pool's workers. Ungrouped partial states are
/// merged pairwise. Grouped aggregation either shares one table between all
/// workers or gives each worker its own table and merges them, depending on
/// [`AggregationMode`].
pub struct AggregationOperator {
	aggregates: Vec<AggregateExpr>,
	handles: Vec<AggregationHandle>,
	group_by: Vec<ColumnId>,
	input_types: Vec<Type>,
	key_types: Vec<Type>,
	config: AggregationConfig,
	pool: ComputePool,
}

impl AggregationOperator {
	#[instrument(name = "aggregate::operator::new", level = "trace", skip(config))]
	pub fn new(
		aggregates: Vec<AggregateExpr>,
		group_by: Vec<ColumnId>,
		input_types: Vec<Type>,
		config: AggregationConfig,
	) -> crate::Result<Self> {
		if aggregates.is_empty() && group_by.is_empty() {
			return Err(Error::NoAggregates);
		}

		let column_type = |column: ColumnId| {
			input_types.get(column).copied().ok_or(reifydb_type::Error::UnknownColumn {
				column,
				width: input_types.len(),
			})
		};

		let key_types = group_by.iter().map(|&c| column_type(c)).collect::<Result<Vec<_>, _>>()?;

		let mut handles = Vec::with_capacity(aggregates.len());
		for aggregate in &aggregates {
			if aggregate.distinct && aggregate.function == AggregateFunction::CountStar {
				return Err(Error::DistinctCountStar);
			}

			let arguments = aggregate.arguments.iter().map(|&c| column_type(c)).collect::<Result<Vec<_>, _>>()?;
			handles.push(AggregationHandle::new(aggregate.function, &arguments)?);
		}

		let pool = ComputePool::new(config.workers)?;

		Ok(Self {
			aggregates,
			handles,
			group_by,
			input_types,
			key_types,
			config,
			pool,
		})
	}

	pub fn handles(&self) -> &[AggregationHandle] {
		&self.handles
	}

	pub fn config(&self) -> &AggregationConfig {
		&self.config
	}

	/// Aggregates all batches. The output holds the group-by columns, in
	/// group-by order, followed by one column per aggregate. Ungrouped
	/// aggregation yields exactly one row; [`AggregationOperator::new`]
	/// rejects an ungrouped plan without aggregates.
	#[instrument(name = "aggregate::operator::execute", level = "trace", skip_all)]
	pub fn execute(&self, batches: &[Columns]) -> crate::Result<Columns> {
		for batch in batches {
			self.validate(batch)?;
		}

		debug!(
			batches = batches.len(),
			workers = self.pool.threads(),
			grouped = !self.group_by.is_empty(),
			mode = ?self.config.mode,
			"aggregation started"
		);

		let distinct: Vec<Option<DistinctTable>> = self
			.aggregates
			.iter()
			.map(|a| a.distinct.then(|| DistinctTable::new(self.config.estimated_groups)))
			.collect();

		let result = if self.group_by.is_empty() {
			self.execute_ungrouped(batches, &distinct)
		} else {
			self.execute_grouped(batches, &distinct)
		};

		debug!(rows = result.row_count(), "aggregation finished");
		Ok(result)
	}

	fn validate(&self, batch: &Columns) -> crate::Result<()> {
		let actual: Vec<Type> = batch.iter().map(|c| c.get_type()).collect();
		let matches = actual.len() == self.input_types.len()
			&& actual.iter().zip(&self.input_types).all(|(a, e)| a == e || *a == Type::Undefined);

		if matches {
			Ok(())
		} else {
			Err(Error::InputMismatch {
				expected: self.input_types.clone(),
				actual,
			})
		}
	}

	fn initial_states(&self) -> Vec<AccumulatorState> {
		self.handles.iter().map(|h| h.create_initial_state()).collect()
	}

	fn execute_ungrouped(&self, batches: &[Columns], distinct: &[Option<DistinctTable>]) -> Columns {
		let states = self.pool.install(|| {
			batches.par_iter()
				.map(|batch| {
					let mut accessor = ColumnsAccessor::new(batch);
					self.aggregates
						.iter()
						.zip(&self.handles)
						.zip(distinct)
						.map(|((aggregate, handle), distinct)| match distinct {
							Some(table) => {
								table.insert_value_accessor(
									&mut accessor,
									&aggregate.arguments,
									&[],
								);
								handle.create_initial_state()
							}
							None => handle.accumulate_value_accessor(
								&mut accessor,
								&aggregate.arguments,
							),
						})
						.collect::<Vec<_>>()
				})
				.reduce(
					|| self.initial_states(),
					|left, right| {
						for (handle, (l, r)) in self.handles.iter().zip(left.iter().zip(&right)) {
							handle.merge_states(r, l);
						}
						left
					},
				)
		});

		let columns = self
			.aggregates
			.iter()
			.zip(&self.handles)
			.zip(states)
			.zip(distinct)
			.map(|(((aggregate, handle), state), distinct)| {
				let state = match distinct {
					Some(table) => handle.aggregate_on_distinctify_hash_table_for_single(table),
					None => state,
				};
				let data = ColumnData::from_values(handle.result_type(), [handle.finalize(&state)]);
				Column::new(aggregate.name.clone(), data)
			})
			.collect();

		Columns::new(columns)
	}

	fn execute_grouped(&self, batches: &[Columns], distinct: &[Option<DistinctTable>]) -> Columns {
		let handles: Vec<&AggregationHandle> = self.handles.iter().collect();
		let implementation = self.config.hash_table_impl();
		let new_table = |implementation: HashTableImpl| {
			GroupingHashTable::new(implementation, &self.key_types, self.config.estimated_groups, &handles)
		};

		let table = match self.config.mode {
			AggregationMode::Shared => {
				let table = new_table(implementation);
				self.pool.install(|| {
					batches.par_iter().for_each(|batch| self.accumulate_grouped(batch, &table, distinct))
				});
				table
			}
			AggregationMode::Partitioned => self.pool.install(|| {
				batches.par_iter()
					.fold(
						|| new_table(implementation),
						|table, batch| {
							self.accumulate_grouped(batch, &table, distinct);
							table
						},
					)
					.reduce(
						|| new_table(implementation),
						|left, right| {
							let (source, destination) = if left.len() >= right.len() {
								(right, left)
							} else {
								(left, right)
							};
							merge_group_by_hash_tables(&handles, &source, &destination);
							destination
						},
					)
			}),
		};

		for (position, (handle, distinct)) in self.handles.iter().zip(distinct).enumerate() {
			if let Some(distinct) = distinct {
				handle.aggregate_on_distinctify_hash_table_for_group_by(distinct, &table, position);
			}
		}

		debug!(groups = table.len(), "grouped aggregation accumulated");

		let mut keys = Vec::new();
		let mut aggregate_columns = Vec::with_capacity(self.handles.len());
		for (position, (aggregate, handle)) in self.aggregates.iter().zip(&self.handles).enumerate() {
			let data = handle.finalize_hash_table(&table, &mut keys, position);
			aggregate_columns.push(Column::new(aggregate.name.clone(), data));
		}
		if self.handles.is_empty() {
			keys = table.keys();
		}

		let mut columns = Vec::with_capacity(self.group_by.len() + aggregate_columns.len());
		for (idx, (&column, &ty)) in self.group_by.iter().zip(table.key_types()).enumerate() {
			let name = batches
				.first()
				.map(|batch| batch[column].name().to_string())
				.unwrap_or_else(|| format!("column_{column}"));
			let data = ColumnData::from_values(ty, keys.iter().map(|key| key[idx].clone()));
			columns.push(Column::new(name, data));
		}
		columns.extend(aggregate_columns);

		Columns::new(columns)
	}

	/// One pass over `batch`: distinct arguments go to their distinct tables,
	/// everything else is applied to the group's payload under a single lock
	/// per row.
	fn accumulate_grouped(&self, batch: &Columns, table: &GroupingHashTable, distinct: &[Option<DistinctTable>]) {
		let mut accessor = ColumnsAccessor::new(batch);

		for (aggregate, distinct) in self.aggregates.iter().zip(distinct) {
			if let Some(distinct) = distinct {
				distinct.insert_value_accessor(&mut accessor, &aggregate.arguments, &self.group_by);
			}
		}

		let direct: Vec<usize> = (0..self.aggregates.len()).filter(|&p| distinct[p].is_none()).collect();
		if direct.is_empty() && !self.aggregates.is_empty() {
			return;
		}

		let mut group = Vec::with_capacity(self.group_by.len());
		let mut arguments: Vec<Vec<Value>> = vec![Vec::new(); direct.len()];

		accessor.reset();
		while accessor.next() {
			accessor.gather(&self.group_by, &mut group);
			for (slot, &position) in direct.iter().enumerate() {
				accessor.gather(&self.aggregates[position].arguments, &mut arguments[slot]);
			}

			table.upsert_with(GroupKey::from(group.as_slice()), |payload| {
				for (slot, &position) in direct.iter().enumerate() {
					self.handles[position]
						.iterate_payload(&arguments[slot], &mut payload[table.region(position)]);
				}
			});
		}
	}
}
