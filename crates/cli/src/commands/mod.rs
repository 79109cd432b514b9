// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod config;
pub mod guide;
pub mod run;

use anyhow::{Context, Result};
use std::path::Path;
use tickwork_engine::EngineConfig;

/// Config file (or defaults) with `TICKWORK_*` overrides applied
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let base = match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    Ok(base.with_env_overrides()?)
}
