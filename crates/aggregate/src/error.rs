// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use rayon::ThreadPoolBuildError;
use reifydb_type::Type;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Type(#[from] reifydb_type::Error),

	#[error("failed to start compute pool: {0}")]
	ComputePool(#[from] ThreadPoolBuildError),

	#[error("COUNT(*) cannot be DISTINCT")]
	DistinctCountStar,

	#[error("aggregation without group-by needs at least one aggregate")]
	NoAggregates,

	#[error("input batch has columns {actual:?}, expected {expected:?}")]
	InputMismatch {
		expected: Vec<Type>,
		actual: Vec<Type>,
	},
}
