// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use reifydb_type::{BinaryOperator, Type, UncheckedBinaryOperator, Value};
use smallvec::{SmallVec, smallvec};

use crate::{
	AggregateFunction,
	store::{FieldRead, FieldStore},
};

const SUM: usize = 0;
const SEEN: usize = 1;
const AVG_COUNT: usize = 1;
const COUNT: usize = 0;
const EXTREMUM: usize = 0;

/// The numeric behaviour of one aggregate kind, written once against
/// [`FieldStore`] so the boxed and the flat state run the same code.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Accumulator {
	Sum {
		add: UncheckedBinaryOperator,
		combine: UncheckedBinaryOperator,
	},
	Avg {
		add: UncheckedBinaryOperator,
		combine: UncheckedBinaryOperator,
		divide: UncheckedBinaryOperator,
	},
	Count,
	CountStar,
	Min,
	Max,
}

impl Accumulator {
	/// Resolves the operators the kind needs against the argument type.
	pub(crate) fn new(function: AggregateFunction, argument: Type) -> reifydb_type::Result<Self> {
		Ok(match function {
			AggregateFunction::Sum => {
				let sum = function.result_type(argument);
				Accumulator::Sum {
					add: BinaryOperator::Add.resolve(sum, argument)?,
					combine: BinaryOperator::Add.resolve(sum, sum)?,
				}
			}
			AggregateFunction::Avg => {
				let sum = function.state_types(argument)[SUM];
				Accumulator::Avg {
					add: BinaryOperator::Add.resolve(sum, argument)?,
					combine: BinaryOperator::Add.resolve(sum, sum)?,
					divide: BinaryOperator::Divide.resolve(sum, Type::Float8)?,
				}
			}
			AggregateFunction::Count => Accumulator::Count,
			AggregateFunction::CountStar => Accumulator::CountStar,
			AggregateFunction::Min => Accumulator::Min,
			AggregateFunction::Max => Accumulator::Max,
		})
	}

	/// The identity state: zero sums, zero counts, undefined extrema.
	pub(crate) fn identity(&self, state_types: &[Type]) -> SmallVec<[Value; 2]> {
		match self {
			Accumulator::Sum {
				..
			} => smallvec![state_types[SUM].zero(), Value::Boolean(false)],
			Accumulator::Avg {
				..
			} => smallvec![state_types[SUM].zero(), Value::Int8(0)],
			Accumulator::Count | Accumulator::CountStar => smallvec![Value::Int8(0)],
			Accumulator::Min | Accumulator::Max => smallvec![Value::Undefined],
		}
	}

	#[inline]
	pub(crate) fn iterate<S: FieldStore + ?Sized>(&self, state: &mut S, arguments: &[Value]) {
		let value = arguments.first().unwrap_or(&Value::Undefined);

		match self {
			Accumulator::CountStar => increment(state, COUNT, 1),
			_ if value.is_undefined() => {}
			Accumulator::Sum {
				add,
				..
			} => {
				let sum = add.apply(&state.field(SUM), value);
				state.set_field(SUM, sum);
				state.set_field(SEEN, Value::Boolean(true));
			}
			Accumulator::Avg {
				add,
				..
			} => {
				let sum = add.apply(&state.field(SUM), value);
				state.set_field(SUM, sum);
				increment(state, AVG_COUNT, 1);
			}
			Accumulator::Count => increment(state, COUNT, 1),
			Accumulator::Min => replace_if(state, value, Ordering::Less),
			Accumulator::Max => replace_if(state, value, Ordering::Greater),
		}
	}

	/// Folds `source` into `destination`. Both must describe disjoint input.
	pub(crate) fn merge<R, S>(&self, source: &R, destination: &mut S)
	where
		R: FieldRead + ?Sized,
		S: FieldStore + ?Sized,
	{
		match self {
			Accumulator::Sum {
				combine,
				..
			} => {
				if source.field(SEEN) == Value::Boolean(true) {
					let sum = combine.apply(&destination.field(SUM), &source.field(SUM));
					destination.set_field(SUM, sum);
					destination.set_field(SEEN, Value::Boolean(true));
				}
			}
			Accumulator::Avg {
				combine,
				..
			} => {
				let sum = combine.apply(&destination.field(SUM), &source.field(SUM));
				destination.set_field(SUM, sum);
				increment(destination, AVG_COUNT, count(source, AVG_COUNT));
			}
			Accumulator::Count | Accumulator::CountStar => {
				increment(destination, COUNT, count(source, COUNT));
			}
			Accumulator::Min => replace_if(destination, &source.field(EXTREMUM), Ordering::Less),
			Accumulator::Max => replace_if(destination, &source.field(EXTREMUM), Ordering::Greater),
		}
	}

	pub(crate) fn finalize<R: FieldRead + ?Sized>(&self, state: &R) -> Value {
		match self {
			Accumulator::Sum {
				..
			} => {
				if state.field(SEEN) == Value::Boolean(true) {
					state.field(SUM)
				} else {
					Value::Undefined
				}
			}
			Accumulator::Avg {
				divide,
				..
			} => match count(state, AVG_COUNT) {
				0 => Value::Undefined,
				n => divide.apply(&state.field(SUM), &Value::float8(n as f64)),
			},
			Accumulator::Count | Accumulator::CountStar => Value::Int8(count(state, COUNT)),
			Accumulator::Min | Accumulator::Max => state.field(EXTREMUM),
		}
	}
}

fn count<R: FieldRead + ?Sized>(state: &R, index: usize) -> i64 {
	state.field(index).as_i64().unwrap_or(0)
}

fn increment<S: FieldStore + ?Sized>(state: &mut S, index: usize, by: i64) {
	let count = count(state, index);
	state.set_field(index, Value::Int8(count + by));
}

fn replace_if<S: FieldStore + ?Sized>(state: &mut S, candidate: &Value, wanted: Ordering) {
	if candidate.is_undefined() {
		return;
	}

	let current = state.field(EXTREMUM);
	if current.is_undefined() || candidate.compare(&current) == Some(wanted) {
		state.set_field(EXTREMUM, candidate.clone());
	}
}
