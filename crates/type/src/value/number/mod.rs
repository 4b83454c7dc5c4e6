// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod compare;

pub use compare::{is_greater_than, is_less_than, partial_cmp};
