// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI integration tests.

#![allow(dead_code)]
#![allow(deprecated)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// The tickwork binary with any `TICKWORK_*` variables from the caller removed
pub fn tickwork() -> Command {
    let mut cmd = Command::cargo_bin("tickwork").expect("tickwork binary");
    cmd.env_remove("TICKWORK_THREADS")
        .env_remove("TICKWORK_TICK_RATE")
        .env_remove("TICKWORK_DEBUG")
        .env_remove("RUST_LOG");
    cmd
}

/// Write `content` to `engine.toml` in a fresh temp dir
pub fn config_file(content: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let path = temp.path().join("engine.toml");
    fs::write(&path, content).expect("Failed to write config");
    (temp, path)
}
