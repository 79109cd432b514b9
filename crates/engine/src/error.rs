// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use crate::config::ConfigError;
use thiserror::Error;

/// Errors returned by engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("worker pool has been shut down")]
    PoolShutDown,
    #[error("failed to build worker pool: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
