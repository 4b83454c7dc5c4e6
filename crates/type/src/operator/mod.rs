// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Binary operators over typed values.
//!
//! An operator is resolved once against its operand types, which fixes the
//! result type and rejects unsupported combinations up front. The resolved
//! [`UncheckedBinaryOperator`] is then applied per value without any further
//! checking beyond debug assertions.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Error, Type, Value};

mod add;
mod divide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
	Add,
	Divide,
}

impl Display for BinaryOperator {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			BinaryOperator::Add => f.write_str("+"),
			BinaryOperator::Divide => f.write_str("/"),
		}
	}
}

impl BinaryOperator {
	pub fn resolve(self, left: Type, right: Type) -> crate::Result<UncheckedBinaryOperator> {
		if !left.is_number() || !right.is_number() {
			return Err(Error::UnsupportedOperation {
				operator: self,
				left,
				right,
			});
		}

		let result = match self {
			BinaryOperator::Add if left.is_integer() && right.is_integer() => Type::Int8,
			BinaryOperator::Add => Type::Float8,
			BinaryOperator::Divide => Type::Float8,
		};

		Ok(UncheckedBinaryOperator {
			operator: self,
			left,
			right,
			result,
		})
	}
}

/// A [`BinaryOperator`] bound to concrete operand types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UncheckedBinaryOperator {
	operator: BinaryOperator,
	left: Type,
	right: Type,
	result: Type,
}

impl UncheckedBinaryOperator {
	pub fn operator(&self) -> BinaryOperator {
		self.operator
	}

	pub fn result_type(&self) -> Type {
		self.result
	}

	/// Applies the operator. An undefined operand yields `Undefined`.
	#[inline]
	pub fn apply(&self, l: &Value, r: &Value) -> Value {
		debug_assert!(l.is_plausible_instance_of(self.left), "left operand {l:?} is not {}", self.left);
		debug_assert!(r.is_plausible_instance_of(self.right), "right operand {r:?} is not {}", self.right);

		match self.operator {
			BinaryOperator::Add => add::apply(self.result, l, r),
			BinaryOperator::Divide => divide::apply(l, r),
		}
	}
}
