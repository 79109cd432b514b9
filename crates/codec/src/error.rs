// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the codec

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("key {0} was not declared on this info stack")]
    UnknownKey(String),
    #[error("no command registered as {0}")]
    UnknownCommand(String),
}
