// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Deref, sync::Arc};

use reifydb_type::{Error, Type};

#[derive(Debug, Clone, PartialEq)]
pub struct PayloadLayout(Arc<PayloadLayoutInner>);

impl Deref for PayloadLayout {
	type Target = PayloadLayoutInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl PayloadLayout {
	pub fn new(types: &[Type]) -> reifydb_type::Result<Self> {
		if let Some(&ty) = types.iter().find(|ty| !ty.is_fixed_size()) {
			return Err(Error::UnsupportedPayloadType(ty));
		}
		Ok(Self(Arc::new(PayloadLayoutInner::new(types))))
	}
}

#[derive(Debug, PartialEq)]
pub struct PayloadLayoutInner {
	pub fields: Vec<PayloadField>,
	/// size of bitvec part in bytes
	pub bitvec_size: usize,
	pub alignment: usize,
	total_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadField {
	pub offset: usize,
	pub size: usize,
	pub align: usize,
	pub r#type: Type,
}

impl PayloadLayoutInner {
	fn new(types: &[Type]) -> Self {
		let bitvec_size = types.len().div_ceil(8);

		let mut offset = bitvec_size;
		let mut fields = Vec::with_capacity(types.len());
		let mut max_align = 1;

		for &ty in types {
			let size = ty.size();
			let align = ty.alignment();

			offset = align_up(offset, align);
			fields.push(PayloadField {
				offset,
				size,
				align,
				r#type: ty,
			});

			offset += size;
			max_align = max_align.max(align);
		}

		Self {
			fields,
			bitvec_size,
			alignment: max_align,
			total_size: align_up(offset, max_align),
		}
	}

	/// A zeroed buffer: every field undefined.
	pub fn allocate(&self) -> Vec<u8> {
		vec![0u8; self.total_size]
	}

	pub const fn total_size(&self) -> usize {
		self.total_size
	}

	pub fn fields(&self) -> &[PayloadField] {
		&self.fields
	}

	pub fn field(&self, index: usize) -> &PayloadField {
		&self.fields[index]
	}

	pub fn is_defined(&self, payload: &[u8], index: usize) -> bool {
		debug_assert!(payload.len() >= self.total_size);
		payload[index / 8] & (1 << (index % 8)) != 0
	}

	pub fn set_undefined(&self, payload: &mut [u8], index: usize) {
		self.set_valid(payload, index, false);
	}

	pub(crate) fn set_valid(&self, payload: &mut [u8], index: usize, valid: bool) {
		debug_assert!(payload.len() >= self.total_size);
		let byte = &mut payload[index / 8];
		let mask = 1 << (index % 8);
		if valid {
			*byte |= mask;
		} else {
			*byte &= !mask;
		}
	}
}

fn align_up(offset: usize, align: usize) -> usize {
	(offset + align).saturating_sub(1) & !(align.saturating_sub(1))
}
