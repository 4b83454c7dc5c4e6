// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_type::Type;

use super::layout::PayloadLayoutInner;

fn read<const N: usize>(payload: &[u8], offset: usize) -> [u8; N] {
	let mut bytes = [0u8; N];
	bytes.copy_from_slice(&payload[offset..offset + N]);
	bytes
}

macro_rules! impl_number {
	($($set:ident, $get:ident, $t:ty, $ty:path);* $(;)?) => {
		impl PayloadLayoutInner {
			$(
				pub fn $set(&self, payload: &mut [u8], index: usize, value: impl Into<$t>) {
					let field = &self.fields[index];
					debug_assert!(payload.len() >= self.total_size());
					debug_assert_eq!(field.r#type, $ty);
					payload[field.offset..field.offset + field.size]
						.copy_from_slice(&value.into().to_le_bytes());
					self.set_valid(payload, index, true);
				}

				pub fn $get(&self, payload: &[u8], index: usize) -> $t {
					let field = &self.fields[index];
					debug_assert!(payload.len() >= self.total_size());
					debug_assert_eq!(field.r#type, $ty);
					<$t>::from_le_bytes(read(payload, field.offset))
				}
			)*
		}
	};
}

impl_number!(
	set_i8, get_i8, i8, Type::Int1;
	set_i16, get_i16, i16, Type::Int2;
	set_i32, get_i32, i32, Type::Int4;
	set_i64, get_i64, i64, Type::Int8;
	set_f32, get_f32, f32, Type::Float4;
	set_f64, get_f64, f64, Type::Float8;
);

impl PayloadLayoutInner {
	pub fn set_bool(&self, payload: &mut [u8], index: usize, value: impl Into<bool>) {
		let field = &self.fields[index];
		debug_assert!(payload.len() >= self.total_size());
		debug_assert_eq!(field.r#type, Type::Boolean);
		payload[field.offset] = value.into() as u8;
		self.set_valid(payload, index, true);
	}

	pub fn get_bool(&self, payload: &[u8], index: usize) -> bool {
		let field = &self.fields[index];
		debug_assert!(payload.len() >= self.total_size());
		debug_assert_eq!(field.r#type, Type::Boolean);
		payload[field.offset] != 0
	}
}
