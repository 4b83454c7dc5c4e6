// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_core::{ColumnData, ColumnId, GroupKey, PayloadLayout, ValueAccessor};
use reifydb_type::{Type, Value};
use tracing::{instrument, trace};

use crate::{
	AccumulatorState, AggregateFunction, DistinctTable, GroupingHashTable, HashTableImpl,
	function::Accumulator,
	state::Fields,
	store::{FieldStore, PayloadRegion, PayloadView},
};

/// Executes one aggregate function over one argument signature.
///
/// The handle keeps a blank [`AccumulatorState`] as template: fresh boxed
/// states are copies of it, and its field types define the flat payload
/// layout. The template is never mutated.
#[derive(Debug)]
pub struct AggregationHandle {
	function: AggregateFunction,
	argument: Type,
	accumulator: Accumulator,
	layout: PayloadLayout,
	blank: AccumulatorState,
}

impl AggregationHandle {
	#[instrument(name = "aggregate::handle::new", level = "trace")]
	pub fn new(function: AggregateFunction, arguments: &[Type]) -> reifydb_type::Result<Self> {
		let argument = function.validate(arguments)?;
		let state_types = function.state_types(argument);

		let accumulator = Accumulator::new(function, argument)?;
		let layout = PayloadLayout::new(&state_types)?;
		let blank = AccumulatorState::new(function, accumulator.identity(&state_types));

		Ok(Self {
			function,
			argument,
			accumulator,
			layout,
			blank,
		})
	}

	pub fn function(&self) -> AggregateFunction {
		self.function
	}

	/// `Type::Undefined` for nullary functions.
	pub fn argument_type(&self) -> Type {
		self.argument
	}

	pub fn result_type(&self) -> Type {
		self.function.result_type(self.argument)
	}

	pub fn payload_layout(&self) -> &PayloadLayout {
		&self.layout
	}

	/// Bytes one flat payload of this handle occupies.
	pub fn payload_size(&self) -> usize {
		self.layout.total_size()
	}

	pub fn create_initial_state(&self) -> AccumulatorState {
		self.blank.clone()
	}

	/// Writes the identity state into `payload`, this handle's region of a
	/// group buffer.
	pub fn init_payload(&self, payload: &mut [u8]) {
		let mut region = PayloadRegion::new(&self.layout, payload);
		for (index, value) in self.blank.snapshot().into_iter().enumerate() {
			region.set_field(index, value);
		}
	}

	/// Adds one row's arguments to `state`. Undefined arguments are skipped,
	/// except by `COUNT(*)`.
	pub fn iterate(&self, state: &AccumulatorState, arguments: &[Value]) {
		self.check(state, arguments);
		let mut fields = state.lock();
		self.accumulator.iterate(&mut fields[..], arguments);
	}

	/// Flat counterpart of [`iterate`](Self::iterate). The caller holds
	/// whatever lock guards `payload`.
	pub fn iterate_payload(&self, arguments: &[Value], payload: &mut [u8]) {
		self.check_arguments(arguments);
		self.accumulator.iterate(&mut PayloadRegion::new(&self.layout, payload), arguments);
	}

	/// Accumulates a whole batch of argument columns without locking per
	/// value. `COUNT(*)` takes no columns; use
	/// [`accumulate_nullary`](Self::accumulate_nullary) for it.
	pub fn accumulate_column_vectors(&self, columns: &[&ColumnData]) -> AccumulatorState {
		debug_assert_eq!(columns.len(), self.function.arity());

		let rows = columns.first().map_or(0, |c| c.len());
		debug_assert!(columns.iter().all(|c| c.len() == rows));

		let mut fields = self.blank.snapshot();
		let mut arguments = Vec::with_capacity(columns.len());
		for row in 0..rows {
			arguments.clear();
			arguments.extend(columns.iter().map(|c| c.get_value(row)));
			self.iterate_fields(&mut fields, &arguments);
		}

		AccumulatorState::new(self.function, fields)
	}

	/// State of a nullary aggregate over `rows` rows.
	pub fn accumulate_nullary(&self, rows: usize) -> AccumulatorState {
		debug_assert_eq!(self.function.arity(), 0);

		let mut fields = self.blank.snapshot();
		for _ in 0..rows {
			self.iterate_fields(&mut fields, &[]);
		}
		AccumulatorState::new(self.function, fields)
	}

	/// Accumulates every row of `accessor`, reading the arguments from
	/// `argument_ids`.
	pub fn accumulate_value_accessor<A: ValueAccessor + ?Sized>(
		&self,
		accessor: &mut A,
		argument_ids: &[ColumnId],
	) -> AccumulatorState {
		debug_assert_eq!(argument_ids.len(), self.function.arity());

		let mut fields = self.blank.snapshot();
		let mut arguments = Vec::with_capacity(argument_ids.len());

		accessor.reset();
		while accessor.next() {
			accessor.gather(argument_ids, &mut arguments);
			self.iterate_fields(&mut fields, &arguments);
		}

		AccumulatorState::new(self.function, fields)
	}

	/// Routes every row of `accessor` into its group's payload in `table`,
	/// creating groups on first sight.
	pub fn aggregate_value_accessor_into_hash_table<A: ValueAccessor + ?Sized>(
		&self,
		accessor: &mut A,
		argument_ids: &[ColumnId],
		group_by_ids: &[ColumnId],
		table: &GroupingHashTable,
		position: usize,
	) {
		debug_assert_eq!(argument_ids.len(), self.function.arity());

		let region = table.region(position);
		let mut group = Vec::with_capacity(group_by_ids.len());
		let mut arguments = Vec::with_capacity(argument_ids.len());

		accessor.reset();
		while accessor.next() {
			accessor.gather(group_by_ids, &mut group);
			accessor.gather(argument_ids, &mut arguments);
			table.upsert_with(GroupKey::from(group.as_slice()), |payload| {
				self.iterate_payload(&arguments, &mut payload[region.clone()])
			});
		}

		trace!(rows = accessor.row_count(), groups = table.len(), "accessor aggregated into hash table");
	}

	/// Folds `source` into `destination`. Both states must belong to this
	/// handle's function and describe disjoint input.
	pub fn merge_states(&self, source: &AccumulatorState, destination: &AccumulatorState) {
		assert_eq!(
			source.function(),
			destination.function(),
			"cannot merge {} state into {} state",
			source.function(),
			destination.function()
		);
		debug_assert_eq!(destination.function(), self.function);

		let source = source.snapshot();
		let mut fields = destination.lock();
		self.accumulator.merge(&source[..], &mut fields[..]);
	}

	/// Flat counterpart of [`merge_states`](Self::merge_states) over two
	/// regions laid out by this handle.
	pub fn merge_states_fast(&self, source: &[u8], destination: &mut [u8]) {
		let source = PayloadView::new(&self.layout, source);
		self.accumulator.merge(&source, &mut PayloadRegion::new(&self.layout, destination));
	}

	pub fn finalize(&self, state: &AccumulatorState) -> Value {
		debug_assert_eq!(state.function(), self.function);
		self.accumulator.finalize(&state.lock()[..])
	}

	/// Finalizes the group `key` of `table`, `None` if the group is absent.
	pub fn finalize_hash_table_entry(&self, table: &GroupingHashTable, key: &GroupKey, position: usize) -> Option<Value> {
		let entry = table.find(key)?;
		let payload = entry.lock();
		Some(self.finalize_hash_table_entry_fast(&payload[table.region(position)]))
	}

	/// Finalizes one region laid out by this handle.
	pub fn finalize_hash_table_entry_fast(&self, payload: &[u8]) -> Value {
		self.accumulator.finalize(&PayloadView::new(&self.layout, payload))
	}

	/// A grouping table holding only this handle's payload.
	pub fn create_group_by_hash_table(
		&self,
		implementation: HashTableImpl,
		key_types: &[Type],
		estimated_groups: usize,
	) -> GroupingHashTable {
		GroupingHashTable::new(implementation, key_types, estimated_groups, &[self])
	}

	/// Feeds every unique value of an ungrouped distinct table into a fresh
	/// state.
	#[instrument(name = "aggregate::handle::aggregate_distinct_single", level = "trace", skip_all)]
	pub fn aggregate_on_distinctify_hash_table_for_single(&self, distinct: &DistinctTable) -> AccumulatorState {
		let mut fields = self.blank.snapshot();
		distinct.for_each(|key| {
			debug_assert!(key.group.is_empty());
			self.iterate_fields(&mut fields, &key.arguments);
		});
		AccumulatorState::new(self.function, fields)
	}

	/// Feeds every unique (group, value) pair of `distinct` into that
	/// group's payload in `table`.
	#[instrument(name = "aggregate::handle::aggregate_distinct_group_by", level = "trace", skip_all)]
	pub fn aggregate_on_distinctify_hash_table_for_group_by(
		&self,
		distinct: &DistinctTable,
		table: &GroupingHashTable,
		position: usize,
	) {
		let region = table.region(position);
		distinct.for_each(|key| {
			table.upsert_with(key.group.clone(), |payload| {
				self.iterate_payload(&key.arguments, &mut payload[region.clone()])
			});
		});
	}

	/// Merges this handle's region of every group in `source` into
	/// `destination`. Groups missing from `destination` are copied.
	#[instrument(name = "aggregate::handle::merge_group_by_hash_tables", level = "trace", skip_all)]
	pub fn merge_group_by_hash_tables(
		&self,
		source: &GroupingHashTable,
		destination: &GroupingHashTable,
		position: usize,
	) {
		debug_assert_eq!(source.layout(), destination.layout());

		let region = destination.region(position);
		for (key, entry) in source.entries() {
			let bytes = entry.lock()[region.clone()].to_vec();
			destination.merge_entry(key, region.clone(), &bytes, |s, d| self.merge_states_fast(s, d));
		}
	}

	/// One finalized value per group of `table`.
	///
	/// With `group_by_keys` empty, groups are emitted in enumeration order and
	/// their keys appended to `group_by_keys`. Otherwise the values follow the
	/// given key order, so several handles co-located in one table produce
	/// aligned columns.
	#[instrument(name = "aggregate::handle::finalize_hash_table", level = "trace", skip_all)]
	pub fn finalize_hash_table(
		&self,
		table: &GroupingHashTable,
		group_by_keys: &mut Vec<GroupKey>,
		position: usize,
	) -> ColumnData {
		let region = table.region(position);
		let mut values = Vec::with_capacity(table.len());

		if group_by_keys.is_empty() {
			for (key, entry) in table.entries() {
				values.push(self.finalize_hash_table_entry_fast(&entry.lock()[region.clone()]));
				group_by_keys.push(key);
			}
		} else {
			for key in group_by_keys.iter() {
				let value = table
					.find(key)
					.map(|entry| self.finalize_hash_table_entry_fast(&entry.lock()[region.clone()]))
					.unwrap_or(Value::Undefined);
				values.push(value);
			}
		}

		ColumnData::from_values(self.result_type(), values)
	}

	fn iterate_fields(&self, fields: &mut Fields, arguments: &[Value]) {
		self.check_arguments(arguments);
		self.accumulator.iterate(&mut fields[..], arguments);
	}

	#[inline]
	fn check(&self, state: &AccumulatorState, arguments: &[Value]) {
		debug_assert_eq!(state.function(), self.function);
		self.check_arguments(arguments);
	}

	#[inline]
	fn check_arguments(&self, arguments: &[Value]) {
		debug_assert_eq!(arguments.len(), self.function.arity(), "{} arity", self.function);
		debug_assert!(
			arguments.iter().all(|a| a.is_plausible_instance_of(self.argument)),
			"{} expects {} arguments, got {arguments:?}",
			self.function,
			self.argument
		);
	}
}
