// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Triggered commands: polled every tick, fired once when their predicate holds

use crate::command::{Command, CommandError};
use std::time::Duration;

/// Default time between predicate checks
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_millis(1000);

/// Accumulates tick deltas and gates predicate checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerTimer {
    interval: Duration,
    accumulated: Duration,
}

impl Default for TriggerTimer {
    fn default() -> Self {
        Self::with_interval(DEFAULT_CHECK_INTERVAL)
    }
}

impl TriggerTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Add `delta`; returns true (and resets) once the interval is reached
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.accumulated = self.accumulated.saturating_add(delta);
        if self.accumulated >= self.interval {
            self.accumulated = Duration::ZERO;
            true
        } else {
            false
        }
    }
}

/// Capability of a triggered command
///
/// Implementors return `Some(self)` from [`Command::as_trigger`] and
/// `Some(CommandKind::Triggered)` from [`Command::kind`].
pub trait Trigger: Command {
    fn timer(&mut self) -> &mut TriggerTimer;

    /// Predicate evaluated once per elapsed interval
    fn check_trigger(&mut self) -> bool;

    /// Advance the timer and fire if due. Firing runs `execute` then `finish`,
    /// so a triggered command fires at most once.
    fn tick(&mut self, delta: Duration) -> Result<(), CommandError> {
        if !self.timer().advance(delta) {
            return Ok(());
        }
        if !self.check_trigger() {
            return Ok(());
        }
        self.execute(delta)?;
        self.finish();
        Ok(())
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
