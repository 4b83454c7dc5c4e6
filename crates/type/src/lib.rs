// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Typed scalar values, type signatures and the binary operators the
//! aggregation core resolves against them.

pub use error::Error;
pub use operator::{BinaryOperator, UncheckedBinaryOperator};
pub use value::{OrderedF32, OrderedF64, Type, Value};

pub mod error;
pub mod operator;
pub mod value;

pub type Result<T> = std::result::Result<T, Error>;
