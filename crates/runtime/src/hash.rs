// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! xxHash3 [`BuildHasher`] for the group and distinct tables.

use core::hash::BuildHasher;

use xxhash_rust::xxh3::Xxh3;

/// Stateless [`BuildHasher`] producing unseeded xxHash3 hashers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh3BuildHasher;

impl BuildHasher for Xxh3BuildHasher {
	type Hasher = Xxh3;

	#[inline]
	fn build_hasher(&self) -> Self::Hasher {
		Xxh3::new()
	}
}
