// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Storage adapters the accumulator logic runs against: an owned list of
//! values for boxed state, and a layout over borrowed payload bytes for flat
//! state.

use reifydb_core::PayloadLayout;
use reifydb_type::Value;

pub(crate) trait FieldRead {
	fn field(&self, index: usize) -> Value;
}

pub(crate) trait FieldStore: FieldRead {
	fn set_field(&mut self, index: usize, value: Value);
}

impl FieldRead for [Value] {
	#[inline]
	fn field(&self, index: usize) -> Value {
		self[index].clone()
	}
}

impl FieldStore for [Value] {
	#[inline]
	fn set_field(&mut self, index: usize, value: Value) {
		self[index] = value;
	}
}

pub(crate) struct PayloadView<'a> {
	layout: &'a PayloadLayout,
	bytes: &'a [u8],
}

impl<'a> PayloadView<'a> {
	pub(crate) fn new(layout: &'a PayloadLayout, bytes: &'a [u8]) -> Self {
		debug_assert!(bytes.len() >= layout.total_size());
		Self {
			layout,
			bytes,
		}
	}
}

impl FieldRead for PayloadView<'_> {
	#[inline]
	fn field(&self, index: usize) -> Value {
		self.layout.get_value(self.bytes, index)
	}
}

pub(crate) struct PayloadRegion<'a> {
	layout: &'a PayloadLayout,
	bytes: &'a mut [u8],
}

impl<'a> PayloadRegion<'a> {
	pub(crate) fn new(layout: &'a PayloadLayout, bytes: &'a mut [u8]) -> Self {
		debug_assert!(bytes.len() >= layout.total_size());
		Self {
			layout,
			bytes,
		}
	}
}

impl FieldRead for PayloadRegion<'_> {
	#[inline]
	fn field(&self, index: usize) -> Value {
		self.layout.get_value(&*self.bytes, index)
	}
}

impl FieldStore for PayloadRegion<'_> {
	#[inline]
	fn set_field(&mut self, index: usize, value: Value) {
		self.layout.set_value(self.bytes, index, &value);
	}
}
