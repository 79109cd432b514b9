// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tickwork config` - Print the effective engine config

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    /// Engine config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn show(args: ConfigArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
