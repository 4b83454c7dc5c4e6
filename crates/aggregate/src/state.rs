// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use parking_lot::{Mutex, MutexGuard};
use reifydb_type::Value;
use smallvec::SmallVec;

use crate::AggregateFunction;

pub(crate) type Fields = SmallVec<[Value; 2]>;

/// Boxed running state of one aggregate over one group, or over the whole
/// input when ungrouped.
///
/// All fields sit behind a single lock, so concurrent `iterate` calls on the
/// same state serialise while distinct states never contend.
#[derive(Debug)]
pub struct AccumulatorState {
	function: AggregateFunction,
	fields: Mutex<Fields>,
}

impl AccumulatorState {
	pub(crate) fn new(function: AggregateFunction, fields: Fields) -> Self {
		Self {
			function,
			fields: Mutex::new(fields),
		}
	}

	pub fn function(&self) -> AggregateFunction {
		self.function
	}

	/// A copy of the current field values, in field order.
	pub fn fields(&self) -> Vec<Value> {
		self.fields.lock().to_vec()
	}

	pub(crate) fn snapshot(&self) -> Fields {
		self.fields.lock().clone()
	}

	pub(crate) fn lock(&self) -> MutexGuard<'_, Fields> {
		self.fields.lock()
	}
}

impl Clone for AccumulatorState {
	fn clone(&self) -> Self {
		Self::new(self.function, self.snapshot())
	}
}
