// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use reifydb_type::{Error, Type};
use smallvec::{SmallVec, smallvec};

mod accumulator;

pub(crate) use accumulator::Accumulator;

/// The aggregate functions the engine can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
	Sum,
	Avg,
	Count,
	/// `COUNT(*)`: counts rows, nulls included.
	CountStar,
	Min,
	Max,
}

impl Display for AggregateFunction {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			AggregateFunction::Sum => f.write_str("SUM"),
			AggregateFunction::Avg => f.write_str("AVG"),
			AggregateFunction::Count => f.write_str("COUNT"),
			AggregateFunction::CountStar => f.write_str("COUNT(*)"),
			AggregateFunction::Min => f.write_str("MIN"),
			AggregateFunction::Max => f.write_str("MAX"),
		}
	}
}

impl AggregateFunction {
	pub fn arity(&self) -> usize {
		match self {
			AggregateFunction::CountStar => 0,
			_ => 1,
		}
	}

	/// Checks the argument signature and returns the argument type,
	/// `Type::Undefined` for nullary functions.
	pub fn validate(&self, arguments: &[Type]) -> reifydb_type::Result<Type> {
		if arguments.len() != self.arity() {
			return Err(Error::ArityMismatch {
				function: self.to_string(),
				expected: self.arity(),
				actual: arguments.len(),
			});
		}

		let Some(&argument) = arguments.first() else {
			return Ok(Type::Undefined);
		};

		let accepted = match self {
			AggregateFunction::Sum | AggregateFunction::Avg => argument.is_number(),
			AggregateFunction::Min | AggregateFunction::Max => argument.is_number() || argument.is_bool(),
			AggregateFunction::Count => true,
			AggregateFunction::CountStar => false,
		};

		if accepted {
			Ok(argument)
		} else {
			Err(Error::UnsupportedArgument {
				function: self.to_string(),
				argument,
			})
		}
	}

	/// Types of the state fields kept per group, in field order.
	pub(crate) fn state_types(&self, argument: Type) -> SmallVec<[Type; 2]> {
		match self {
			AggregateFunction::Sum => smallvec![sum_type(argument), Type::Boolean],
			AggregateFunction::Avg => smallvec![sum_type(argument), Type::Int8],
			AggregateFunction::Count | AggregateFunction::CountStar => smallvec![Type::Int8],
			AggregateFunction::Min | AggregateFunction::Max => smallvec![argument],
		}
	}

	pub fn result_type(&self, argument: Type) -> Type {
		match self {
			AggregateFunction::Sum => sum_type(argument),
			AggregateFunction::Avg => Type::Float8,
			AggregateFunction::Count | AggregateFunction::CountStar => Type::Int8,
			AggregateFunction::Min | AggregateFunction::Max => argument,
		}
	}
}

fn sum_type(argument: Type) -> Type {
	argument.sum_type().unwrap_or(Type::Float8)
}
