// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{Type, Value};

/// Integer addition wraps in two's complement; there is no runtime error
/// path during accumulation.
#[inline]
pub(super) fn apply(result: Type, l: &Value, r: &Value) -> Value {
	match result {
		Type::Int8 => match (l.as_i64(), r.as_i64()) {
			(Some(l), Some(r)) => Value::Int8(l.wrapping_add(r)),
			_ => Value::Undefined,
		},
		_ => match (l.as_f64(), r.as_f64()) {
			(Some(l), Some(r)) => Value::float8(l + r),
			_ => Value::Undefined,
		},
	}
}
