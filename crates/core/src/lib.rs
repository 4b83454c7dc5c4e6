// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub use accessor::{ColumnId, ColumnsAccessor, ValueAccessor};
pub use group::GroupKey;
pub use payload::{PayloadField, PayloadLayout};
pub use reifydb_type::{Error, Result};
pub use value::column::{Column, ColumnData, Columns};

pub mod accessor;
pub mod group;
pub mod payload;
pub mod value;
