// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tickwork run` - Run the demo workload for a fixed time

use crate::demo::{self, Workload};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tickwork_codec::InfoStack;
use tickwork_engine::{logging, Engine};

#[derive(Args)]
pub struct RunArgs {
    /// Engine config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// How long to run before stopping (e.g. "1s", "250ms")
    #[arg(long, default_value = "1s", value_parser = humantime::parse_duration)]
    pub duration: Duration,

    /// Queued countdown commands
    #[arg(long, default_value_t = 3)]
    pub queued: u32,

    /// Triggered heartbeat commands
    #[arg(long, default_value_t = 1)]
    pub triggered: u32,

    /// Children of one command stack (0 for no stack)
    #[arg(long, default_value_t = 2)]
    pub stack: u32,

    /// Queued commands that fail on purpose
    #[arg(long, default_value_t = 0)]
    pub faulty: u32,

    /// Steps per countdown
    #[arg(long, default_value_t = 2)]
    pub steps: u32,

    /// Heartbeat check interval
    #[arg(long, default_value = "100ms", value_parser = humantime::parse_duration)]
    pub interval: Duration,

    /// Log every command added or submitted
    #[arg(long)]
    pub debug: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RunArgs) -> Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;
    if args.debug {
        config.debug = true;
    }
    logging::init(config.debug);

    let engine = Engine::from_config(&config)?;
    let workload = Workload {
        queued: args.queued,
        triggered: args.triggered,
        stack: args.stack,
        faulty: args.faulty,
        steps: args.steps,
        interval: args.interval,
    };
    let added = demo::schedule(&engine, &workload)?;
    tracing::info!(added, duration_ms = args.duration.as_millis() as u64, "running workload");

    let started = Instant::now();
    engine.start()?;
    std::thread::sleep(args.duration);
    let tally = engine.stop();

    if args.json {
        let mut summary = InfoStack::new(["executed", "failed", "elapsed"]);
        summary.fulfill_key("executed", tally.executed.to_string())?;
        summary.fulfill_key("failed", tally.failed.to_string())?;
        summary.fulfill_key(
            "elapsed",
            humantime::format_duration(round_millis(started.elapsed())).to_string(),
        )?;
        println!("{}", summary.to_json()?);
    } else {
        println!("executed: {}", tally.executed);
        println!("failed: {}", tally.failed);
    }
    Ok(())
}

fn round_millis(elapsed: Duration) -> Duration {
    Duration::from_millis(elapsed.as_millis() as u64)
}
