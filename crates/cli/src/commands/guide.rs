// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tickwork guide [name]` - Describe the demo command types

use crate::demo;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct GuideArgs {
    /// Command type to describe; all of them when omitted
    pub name: Option<String>,
}

pub fn guide(args: GuideArgs) -> Result<()> {
    let registry = demo::registry();
    match args.name {
        Some(name) => println!("{}", registry.guide(&name)?),
        None => {
            for name in registry.names() {
                println!("{}", registry.guide(name)?);
            }
        }
    }
    Ok(())
}
