// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use crate::Value;

/// Compares two numeric values after promotion. Integers compare exactly as
/// `i64`; as soon as one side is floating point both sides compare as `f64`.
#[inline]
pub fn partial_cmp(l: &Value, r: &Value) -> Option<Ordering> {
	match (l.as_i64(), r.as_i64()) {
		(Some(l), Some(r)) => Some(l.cmp(&r)),
		_ => l.as_f64().zip(r.as_f64()).and_then(|(l, r)| l.partial_cmp(&r)),
	}
}

#[inline]
pub fn is_greater_than(l: &Value, r: &Value) -> bool {
	partial_cmp(l, r).is_some_and(|o| o == Ordering::Greater)
}

#[inline]
pub fn is_less_than(l: &Value, r: &Value) -> bool {
	partial_cmp(l, r).is_some_and(|o| o == Ordering::Less)
}
