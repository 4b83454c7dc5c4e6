// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fixed-width records laid out inside borrowed byte buffers.
//!
//! A payload starts with a validity bitvec, one bit per field, followed by
//! every field at its natural alignment relative to the start of the
//! payload. Layouts are computed once and shared by every buffer built from
//! them; buffers themselves are plain `[u8]` slices owned by someone else.

mod layout;
mod number;
mod value;

pub use layout::{PayloadField, PayloadLayout, PayloadLayoutInner};
