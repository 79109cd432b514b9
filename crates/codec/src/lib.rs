// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Text helpers for tickwork command authors
//!
//! JSON stringify/parse, pointer lookups, self-describing command guides and
//! fixed-key info stacks. The engine does not depend on this crate.

mod describe;
mod error;
mod info;
mod json;

pub use describe::{guide, Argument, CommandRegistry, Describe, Descriptor};
pub use error::CodecError;
pub use info::InfoStack;
pub use json::{parse, stringify, value_at_path};
