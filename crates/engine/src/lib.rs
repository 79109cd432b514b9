// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Tickwork command engine
//!
//! Runs commands under three disciplines on a shared worker pool, driven by a
//! fixed-rate tick: queued commands drain one at a time in FIFO order,
//! parallel commands each get their own throttled loop, and triggered
//! commands are polled until their predicate fires once.

mod clock;
mod command;
mod config;
mod engine;
mod error;
mod instant;
pub mod logging;
mod loops;
mod scheduler;
mod stack;
mod trigger;

#[cfg(test)]
mod test_support;

pub use clock::{frame_time, sleep_budget, Clock, FakeClock, Stopwatch, SystemClock, MIN_SLEEP};
pub use command::{Command, CommandError, CommandInfo, CommandKind, CommandState, Lifecycle};
pub use config::{ConfigError, EngineConfig, ENV_DEBUG, ENV_THREADS, ENV_TICK_RATE};
pub use engine::{Engine, EngineBuilder, EngineHandle};
pub use error::EngineError;
pub use instant::InstantCommand;
pub use scheduler::Tally;
pub use stack::{CommandStack, StackHandle};
pub use trigger::{Trigger, TriggerTimer, DEFAULT_CHECK_INTERVAL};
