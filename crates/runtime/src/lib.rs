// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod compute;
pub mod hash;

pub use compute::ComputePool;
