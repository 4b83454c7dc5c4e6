// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Range;

use crate::AggregationHandle;

const REGION_ALIGNMENT: usize = 8;

/// Places the payloads of several co-located handles one after another in
/// a single group buffer. Each handle owns the byte range at its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateLayout {
	regions: Vec<Range<usize>>,
	total_size: usize,
}

impl AggregateLayout {
	pub fn new(sizes: impl IntoIterator<Item = usize>) -> Self {
		let mut regions = Vec::new();
		let mut offset = 0;

		for size in sizes {
			regions.push(offset..offset + size);
			offset = align_up(offset + size, REGION_ALIGNMENT);
		}

		Self {
			regions,
			total_size: offset,
		}
	}

	pub fn from_handles(handles: &[&AggregationHandle]) -> Self {
		Self::new(handles.iter().map(|h| h.payload_size()))
	}

	pub fn region(&self, position: usize) -> Range<usize> {
		self.regions[position].clone()
	}

	pub fn regions(&self) -> &[Range<usize>] {
		&self.regions
	}

	pub fn total_size(&self) -> usize {
		self.total_size
	}

	pub fn len(&self) -> usize {
		self.regions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.regions.is_empty()
	}
}

fn align_up(offset: usize, align: usize) -> usize {
	offset.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
	use crate::AggregateLayout;

	#[test]
	fn test_regions_do_not_overlap() {
		let layout = AggregateLayout::new([24, 2, 16]);
		assert_eq!(layout.region(0), 0..24);
		assert_eq!(layout.region(1), 24..26);
		assert_eq!(layout.region(2), 32..48);
		assert_eq!(layout.total_size(), 48);
		assert_eq!(layout.len(), 3);
	}

	#[test]
	fn test_empty() {
		let layout = AggregateLayout::new(Vec::<usize>::new());
		assert!(layout.is_empty());
		assert_eq!(layout.total_size(), 0);
	}
}
