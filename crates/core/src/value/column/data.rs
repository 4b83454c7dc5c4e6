// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_type::{Type, Value};

/// Typed column storage. Every variant pairs the values with a validity
/// vector of the same length; an invalid slot reads back as `Undefined`.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
	Bool(Vec<bool>, Vec<bool>),
	Float4(Vec<f32>, Vec<bool>),
	Float8(Vec<f64>, Vec<bool>),
	Int1(Vec<i8>, Vec<bool>),
	Int2(Vec<i16>, Vec<bool>),
	Int4(Vec<i32>, Vec<bool>),
	Int8(Vec<i64>, Vec<bool>),
	Utf8(Vec<String>, Vec<bool>),
	Undefined(usize),
}

macro_rules! impl_constructors {
	($($variant:ident, $t:ty, $new:ident, $optional:ident);* $(;)?) => {
		impl ColumnData {
			$(
				pub fn $new(data: impl IntoIterator<Item = $t>) -> Self {
					let data: Vec<$t> = data.into_iter().collect();
					let valid = vec![true; data.len()];
					ColumnData::$variant(data, valid)
				}

				pub fn $optional(data: impl IntoIterator<Item = Option<$t>>) -> Self {
					let (data, valid) = data
						.into_iter()
						.map(|v| match v {
							Some(v) => (v, true),
							None => (<$t>::default(), false),
						})
						.unzip();
					ColumnData::$variant(data, valid)
				}
			)*
		}
	};
}

impl_constructors!(
	Bool, bool, bool, bool_optional;
	Float4, f32, float4, float4_optional;
	Float8, f64, float8, float8_optional;
	Int1, i8, int1, int1_optional;
	Int2, i16, int2, int2_optional;
	Int4, i32, int4, int4_optional;
	Int8, i64, int8, int8_optional;
);

impl ColumnData {
	pub fn utf8<S: Into<String>>(data: impl IntoIterator<Item = S>) -> Self {
		let data: Vec<String> = data.into_iter().map(Into::into).collect();
		let valid = vec![true; data.len()];
		ColumnData::Utf8(data, valid)
	}

	pub fn utf8_optional<S: Into<String>>(data: impl IntoIterator<Item = Option<S>>) -> Self {
		let (data, valid) = data
			.into_iter()
			.map(|v| match v {
				Some(v) => (v.into(), true),
				None => (String::new(), false),
			})
			.unzip();
		ColumnData::Utf8(data, valid)
	}

	pub fn undefined(len: usize) -> Self {
		ColumnData::Undefined(len)
	}

	pub fn with_capacity(ty: Type, capacity: usize) -> Self {
		match ty {
			Type::Boolean => ColumnData::Bool(Vec::with_capacity(capacity), Vec::with_capacity(capacity)),
			Type::Float4 => ColumnData::Float4(Vec::with_capacity(capacity), Vec::with_capacity(capacity)),
			Type::Float8 => ColumnData::Float8(Vec::with_capacity(capacity), Vec::with_capacity(capacity)),
			Type::Int1 => ColumnData::Int1(Vec::with_capacity(capacity), Vec::with_capacity(capacity)),
			Type::Int2 => ColumnData::Int2(Vec::with_capacity(capacity), Vec::with_capacity(capacity)),
			Type::Int4 => ColumnData::Int4(Vec::with_capacity(capacity), Vec::with_capacity(capacity)),
			Type::Int8 => ColumnData::Int8(Vec::with_capacity(capacity), Vec::with_capacity(capacity)),
			Type::Utf8 => ColumnData::Utf8(Vec::with_capacity(capacity), Vec::with_capacity(capacity)),
			Type::Undefined => ColumnData::Undefined(0),
		}
	}

	/// Builds a column of type `ty` from values. `Undefined` entries become
	/// invalid slots.
	pub fn from_values(ty: Type, values: impl IntoIterator<Item = Value>) -> Self {
		let values = values.into_iter();
		let mut result = ColumnData::with_capacity(ty, values.size_hint().0);
		for value in values {
			result.push_value(value);
		}
		result
	}
}

impl ColumnData {
	pub fn get_type(&self) -> Type {
		match self {
			ColumnData::Bool(..) => Type::Boolean,
			ColumnData::Float4(..) => Type::Float4,
			ColumnData::Float8(..) => Type::Float8,
			ColumnData::Int1(..) => Type::Int1,
			ColumnData::Int2(..) => Type::Int2,
			ColumnData::Int4(..) => Type::Int4,
			ColumnData::Int8(..) => Type::Int8,
			ColumnData::Utf8(..) => Type::Utf8,
			ColumnData::Undefined(_) => Type::Undefined,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			ColumnData::Bool(_, valid)
			| ColumnData::Float4(_, valid)
			| ColumnData::Float8(_, valid)
			| ColumnData::Int1(_, valid)
			| ColumnData::Int2(_, valid)
			| ColumnData::Int4(_, valid)
			| ColumnData::Int8(_, valid)
			| ColumnData::Utf8(_, valid) => valid.len(),
			ColumnData::Undefined(len) => *len,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn is_defined(&self, index: usize) -> bool {
		match self {
			ColumnData::Bool(_, valid)
			| ColumnData::Float4(_, valid)
			| ColumnData::Float8(_, valid)
			| ColumnData::Int1(_, valid)
			| ColumnData::Int2(_, valid)
			| ColumnData::Int4(_, valid)
			| ColumnData::Int8(_, valid)
			| ColumnData::Utf8(_, valid) => valid[index],
			ColumnData::Undefined(_) => false,
		}
	}

	pub fn get_value(&self, index: usize) -> Value {
		if !self.is_defined(index) {
			return Value::Undefined;
		}

		match self {
			ColumnData::Bool(data, _) => Value::Boolean(data[index]),
			ColumnData::Float4(data, _) => Value::float4(data[index]),
			ColumnData::Float8(data, _) => Value::float8(data[index]),
			ColumnData::Int1(data, _) => Value::Int1(data[index]),
			ColumnData::Int2(data, _) => Value::Int2(data[index]),
			ColumnData::Int4(data, _) => Value::Int4(data[index]),
			ColumnData::Int8(data, _) => Value::Int8(data[index]),
			ColumnData::Utf8(data, _) => Value::Utf8(data[index].clone()),
			ColumnData::Undefined(_) => Value::Undefined,
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
		(0..self.len()).map(|index| self.get_value(index))
	}

	/// Appends a value. The value must be `Undefined` or match the column
	/// type.
	pub fn push_value(&mut self, value: Value) {
		debug_assert!(
			value.is_plausible_instance_of(self.get_type()),
			"cannot push {value:?} into a {} column",
			self.get_type()
		);

		match (self, value) {
			(ColumnData::Bool(data, valid), Value::Boolean(v)) => {
				data.push(v);
				valid.push(true);
			}
			(ColumnData::Float4(data, valid), Value::Float4(v)) => {
				data.push(v.value());
				valid.push(true);
			}
			(ColumnData::Float8(data, valid), Value::Float8(v)) => {
				data.push(v.value());
				valid.push(true);
			}
			(ColumnData::Int1(data, valid), Value::Int1(v)) => {
				data.push(v);
				valid.push(true);
			}
			(ColumnData::Int2(data, valid), Value::Int2(v)) => {
				data.push(v);
				valid.push(true);
			}
			(ColumnData::Int4(data, valid), Value::Int4(v)) => {
				data.push(v);
				valid.push(true);
			}
			(ColumnData::Int8(data, valid), Value::Int8(v)) => {
				data.push(v);
				valid.push(true);
			}
			(ColumnData::Utf8(data, valid), Value::Utf8(v)) => {
				data.push(v);
				valid.push(true);
			}
			(ColumnData::Undefined(len), _) => *len += 1,
			(column, _) => column.push_undefined(),
		}
	}

	pub fn push_undefined(&mut self) {
		match self {
			ColumnData::Bool(data, valid) => {
				data.push(false);
				valid.push(false);
			}
			ColumnData::Float4(data, valid) => {
				data.push(0.0);
				valid.push(false);
			}
			ColumnData::Float8(data, valid) => {
				data.push(0.0);
				valid.push(false);
			}
			ColumnData::Int1(data, valid) => {
				data.push(0);
				valid.push(false);
			}
			ColumnData::Int2(data, valid) => {
				data.push(0);
				valid.push(false);
			}
			ColumnData::Int4(data, valid) => {
				data.push(0);
				valid.push(false);
			}
			ColumnData::Int8(data, valid) => {
				data.push(0);
				valid.push(false);
			}
			ColumnData::Utf8(data, valid) => {
				data.push(String::new());
				valid.push(false);
			}
			ColumnData::Undefined(len) => *len += 1,
		}
	}
}
