// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_type::{Type, Value};

use super::layout::PayloadLayoutInner;

impl PayloadLayoutInner {
	/// Reads a field as a typed value; an undefined field reads as
	/// `Value::Undefined`.
	pub fn get_value(&self, payload: &[u8], index: usize) -> Value {
		if !self.is_defined(payload, index) {
			return Value::Undefined;
		}

		match self.fields[index].r#type {
			Type::Boolean => Value::Boolean(self.get_bool(payload, index)),
			Type::Float4 => Value::float4(self.get_f32(payload, index)),
			Type::Float8 => Value::float8(self.get_f64(payload, index)),
			Type::Int1 => Value::Int1(self.get_i8(payload, index)),
			Type::Int2 => Value::Int2(self.get_i16(payload, index)),
			Type::Int4 => Value::Int4(self.get_i32(payload, index)),
			Type::Int8 => Value::Int8(self.get_i64(payload, index)),
			Type::Utf8 | Type::Undefined => Value::Undefined,
		}
	}

	/// Writes a value of the field's type; `Undefined` clears the field.
	pub fn set_value(&self, payload: &mut [u8], index: usize, value: &Value) {
		let ty = self.fields[index].r#type;
		debug_assert!(value.is_plausible_instance_of(ty), "cannot store {value:?} in a {ty} field");

		match (ty, value) {
			(Type::Boolean, Value::Boolean(v)) => self.set_bool(payload, index, *v),
			(Type::Float4, Value::Float4(v)) => self.set_f32(payload, index, v.value()),
			(Type::Float8, Value::Float8(v)) => self.set_f64(payload, index, v.value()),
			(Type::Int1, Value::Int1(v)) => self.set_i8(payload, index, *v),
			(Type::Int2, Value::Int2(v)) => self.set_i16(payload, index, *v),
			(Type::Int4, Value::Int4(v)) => self.set_i32(payload, index, *v),
			(Type::Int8, Value::Int8(v)) => self.set_i64(payload, index, *v),
			_ => self.set_undefined(payload, index),
		}
	}
}

#[cfg(test)]
mod tests {
	use reifydb_type::{Type, Value};

	use crate::PayloadLayout;

	#[test]
	fn test_every_fixed_type() {
		let types = [
			Type::Boolean,
			Type::Float4,
			Type::Float8,
			Type::Int1,
			Type::Int2,
			Type::Int4,
			Type::Int8,
		];
		let values = [
			Value::Boolean(true),
			Value::float4(2.5f32),
			Value::float8(-3.75f64),
			Value::Int1(-7),
			Value::Int2(300),
			Value::Int4(-70000),
			Value::Int8(1 << 40),
		];

		let layout = PayloadLayout::new(&types).unwrap();
		let mut payload = layout.allocate();
		for (idx, value) in values.iter().enumerate() {
			layout.set_value(&mut payload, idx, value);
		}

		for (idx, value) in values.iter().enumerate() {
			assert_eq!(&layout.get_value(&payload, idx), value);
		}
	}

	#[test]
	fn test_undefined_clears() {
		let layout = PayloadLayout::new(&[Type::Int4]).unwrap();
		let mut payload = layout.allocate();

		assert_eq!(layout.get_value(&payload, 0), Value::Undefined);

		layout.set_value(&mut payload, 0, &Value::Int4(5));
		assert_eq!(layout.get_value(&payload, 0), Value::Int4(5));

		layout.set_value(&mut payload, 0, &Value::Undefined);
		assert_eq!(layout.get_value(&payload, 0), Value::Undefined);
	}

	#[test]
	fn test_zero_is_defined() {
		let layout = PayloadLayout::new(&[Type::Float8]).unwrap();
		let mut payload = layout.allocate();
		layout.set_value(&mut payload, 0, &Value::float8(0.0f64));
		assert_eq!(layout.get_value(&payload, 0), Value::float8(0.0f64));
	}
}
