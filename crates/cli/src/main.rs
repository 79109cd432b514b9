// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tickwork - run and inspect the tick-driven command engine

mod commands;
mod demo;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, guide, run};

#[derive(Parser)]
#[command(
    name = "tickwork",
    version,
    about = "Tickwork - tick-driven command engine demo"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a demo workload and print the final tally
    Run(run::RunArgs),
    /// Print the effective engine config as TOML
    Config(config::ConfigArgs),
    /// Describe the demo command types as JSON
    Guide(guide::GuideArgs),
}

// The engine owns its worker pool, so main stays synchronous
fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run::run(args),
        Commands::Config(args) => config::show(args),
        Commands::Guide(args) => guide::guide(args),
    }
}
