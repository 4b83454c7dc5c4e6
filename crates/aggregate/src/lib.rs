// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Aggregate functions over column batches.
//!
//! Every aggregate kind keeps its running state in one of two forms: a boxed
//! [`AccumulatorState`] guarded by its own lock, or a flat region inside a
//! [`GroupingHashTable`] payload. Both forms run through the same numeric
//! code, so they produce identical results for identical input.
//!
//! Updates to one group are serialised by that group's lock only. The order
//! in which concurrent workers add into a group is not defined, so floating
//! point sums are not bitwise reproducible across runs.

pub use config::{AggregationConfig, AggregationMode};
pub use distinct::{DistinctKey, DistinctTable};
pub use error::Error;
pub use function::AggregateFunction;
pub use handle::AggregationHandle;
pub use hash_table::{GroupEntry, GroupingHashTable, HashTableImpl};
pub use layout::AggregateLayout;
pub use merge::merge_group_by_hash_tables;
pub use operator::{AggregateExpr, AggregationOperator};
pub use state::AccumulatorState;

mod config;
mod distinct;
mod error;
mod function;
mod handle;
mod hash_table;
mod layout;
mod merge;
mod operator;
mod state;
mod store;

pub type Result<T> = std::result::Result<T, Error>;
