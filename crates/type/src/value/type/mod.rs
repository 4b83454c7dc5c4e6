// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Value;

/// All value types the aggregation core understands
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
	/// A boolean: true or false.
	Boolean,
	/// A 4-byte floating point
	Float4,
	/// An 8-byte floating point
	Float8,
	/// A 1-byte signed integer
	Int1,
	/// A 2-byte signed integer
	Int2,
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte signed integer
	Int8,
	/// A UTF-8 encoded text.
	Utf8,
	/// Value is not defined (think null in common programming languages)
	Undefined,
}

impl Type {
	pub fn is_number(&self) -> bool {
		matches!(self, Type::Float4 | Type::Float8 | Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8)
	}

	pub fn is_bool(&self) -> bool {
		matches!(self, Type::Boolean)
	}

	pub fn is_integer(&self) -> bool {
		matches!(self, Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8)
	}

	pub fn is_floating_point(&self) -> bool {
		matches!(self, Type::Float4 | Type::Float8)
	}

	pub fn is_utf8(&self) -> bool {
		matches!(self, Type::Utf8)
	}

	/// Types whose values have a fixed byte width and can live inside a
	/// flat payload.
	pub fn is_fixed_size(&self) -> bool {
		self.is_number() || self.is_bool()
	}
}

impl Type {
	pub fn size(&self) -> usize {
		match self {
			Type::Boolean => 1,
			Type::Float4 => 4,
			Type::Float8 => 8,
			Type::Int1 => 1,
			Type::Int2 => 2,
			Type::Int4 => 4,
			Type::Int8 => 8,
			Type::Utf8 => 0,
			Type::Undefined => 0,
		}
	}

	pub fn alignment(&self) -> usize {
		match self {
			Type::Boolean => 1,
			Type::Float4 => 4,
			Type::Float8 => 8,
			Type::Int1 => 1,
			Type::Int2 => 2,
			Type::Int4 => 4,
			Type::Int8 => 8,
			Type::Utf8 => 1,
			Type::Undefined => 1,
		}
	}
}

impl Type {
	/// The type a running total over values of this type is kept in.
	/// Integers widen to `Int8`, floating point widens to `Float8`.
	pub fn sum_type(&self) -> Option<Type> {
		if self.is_integer() {
			Some(Type::Int8)
		} else if self.is_floating_point() {
			Some(Type::Float8)
		} else {
			None
		}
	}

	/// The additive identity of a numeric type, `Undefined` otherwise.
	pub fn zero(&self) -> Value {
		match self {
			Type::Float4 => Value::float4(0.0f32),
			Type::Float8 => Value::float8(0.0f64),
			Type::Int1 => Value::Int1(0),
			Type::Int2 => Value::Int2(0),
			Type::Int4 => Value::Int4(0),
			Type::Int8 => Value::Int8(0),
			_ => Value::Undefined,
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Boolean => f.write_str("BOOLEAN"),
			Type::Float4 => f.write_str("FLOAT4"),
			Type::Float8 => f.write_str("FLOAT8"),
			Type::Int1 => f.write_str("INT1"),
			Type::Int2 => f.write_str("INT2"),
			Type::Int4 => f.write_str("INT4"),
			Type::Int8 => f.write_str("INT8"),
			Type::Utf8 => f.write_str("UTF8"),
			Type::Undefined => f.write_str("UNDEFINED"),
		}
	}
}

impl From<&Value> for Type {
	fn from(value: &Value) -> Self {
		value.get_type()
	}
}
