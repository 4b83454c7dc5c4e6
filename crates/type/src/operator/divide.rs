// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::Value;

#[inline]
pub(super) fn apply(l: &Value, r: &Value) -> Value {
	match (l.as_f64(), r.as_f64()) {
		(Some(_), Some(r)) if r == 0.0 => Value::Undefined,
		(Some(l), Some(r)) => Value::float8(l / r),
		_ => Value::Undefined,
	}
}
