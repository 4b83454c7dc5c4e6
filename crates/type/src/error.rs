// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{operator::BinaryOperator, value::Type};

/// Errors raised while planning an aggregation.
///
/// Accumulation itself never fails; anything that would make it fail is
/// rejected here, before the first row is seen.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("{function} does not accept an argument of type {argument}")]
	UnsupportedArgument {
		function: String,
		argument: Type,
	},

	#[error("{function} expects {expected} argument(s), got {actual}")]
	ArityMismatch {
		function: String,
		expected: usize,
		actual: usize,
	},

	#[error("operator {operator} is not defined for {left} and {right}")]
	UnsupportedOperation {
		operator: BinaryOperator,
		left: Type,
		right: Type,
	},

	#[error("type {0} cannot be stored in a fixed-width payload")]
	UnsupportedPayloadType(Type),

	#[error("column {column} is out of range for an input of {width} column(s)")]
	UnknownColumn {
		column: usize,
		width: usize,
	},
}
