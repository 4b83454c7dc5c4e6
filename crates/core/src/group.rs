// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
};

use reifydb_type::Value;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The tuple of group-by values identifying one group. Ungrouped
/// aggregation uses the empty key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey(pub SmallVec<[Value; 4]>);

impl GroupKey {
	pub fn empty() -> Self {
		Self(SmallVec::new())
	}

	pub fn values(&self) -> &[Value] {
		&self.0
	}

	pub fn into_values(self) -> SmallVec<[Value; 4]> {
		self.0
	}
}

impl Deref for GroupKey {
	type Target = [Value];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<Vec<Value>> for GroupKey {
	fn from(values: Vec<Value>) -> Self {
		Self(SmallVec::from_vec(values))
	}
}

impl From<&[Value]> for GroupKey {
	fn from(values: &[Value]) -> Self {
		Self(values.iter().cloned().collect())
	}
}

impl<const N: usize> From<[Value; N]> for GroupKey {
	fn from(values: [Value; N]) -> Self {
		Self(values.into_iter().collect())
	}
}

impl FromIterator<Value> for GroupKey {
	fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl Display for GroupKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("(")?;
		for (idx, value) in self.0.iter().enumerate() {
			if idx > 0 {
				f.write_str(", ")?;
			}
			Display::fmt(value, f)?;
		}
		f.write_str(")")
	}
}
