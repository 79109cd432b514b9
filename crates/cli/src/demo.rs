// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Demo workload: one command type per discipline

use std::time::Duration;
use tickwork_codec::{Argument, CommandRegistry, Describe};
use tickwork_engine::{
    Command, CommandError, CommandKind, CommandStack, Engine, EngineError, Lifecycle, Trigger,
    TriggerTimer,
};

/// Queued command that finishes after `remaining` steps
pub struct Countdown {
    lifecycle: Lifecycle,
    name: String,
    remaining: u32,
}

impl Countdown {
    pub fn new(name: impl Into<String>, steps: u32) -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            name: name.into(),
            remaining: steps,
        }
    }
}

impl Describe for Countdown {
    fn description() -> &'static str {
        "Counts down one step per tick, then finishes"
    }

    fn arguments() -> Vec<Argument> {
        vec![
            Argument::new("name", "Label used in logs"),
            Argument::typed::<u32>("steps", ""),
        ]
    }
}

impl Command for Countdown {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn kind(&self) -> Option<CommandKind> {
        Some(CommandKind::Queued)
    }

    fn id(&self) -> String {
        self.name.clone()
    }

    fn handle_error(&mut self, error: &CommandError) {
        tracing::warn!(command = %self.name, error = %error, "countdown failed");
    }

    fn execute(&mut self, delta: Duration) -> Result<(), CommandError> {
        self.remaining = self.remaining.saturating_sub(1);
        tracing::debug!(
            command = %self.name,
            remaining = self.remaining,
            delta_ms = delta.as_millis() as u64,
            "countdown step"
        );
        if self.remaining == 0 {
            self.finish();
        }
        Ok(())
    }
}

/// Triggered command that fires once its interval has elapsed
pub struct Heartbeat {
    lifecycle: Lifecycle,
    name: String,
    timer: TriggerTimer,
}

impl Heartbeat {
    pub fn new(name: impl Into<String>, interval: Duration) -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            name: name.into(),
            timer: TriggerTimer::with_interval(interval),
        }
    }
}

impl Describe for Heartbeat {
    fn description() -> &'static str {
        "Fires once after its check interval"
    }

    fn arguments() -> Vec<Argument> {
        vec![Argument::typed::<Duration>("interval", "")]
    }
}

impl Command for Heartbeat {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn kind(&self) -> Option<CommandKind> {
        Some(CommandKind::Triggered)
    }

    fn id(&self) -> String {
        self.name.clone()
    }

    fn handle_error(&mut self, error: &CommandError) {
        tracing::warn!(command = %self.name, error = %error, "heartbeat failed");
    }

    fn execute(&mut self, _delta: Duration) -> Result<(), CommandError> {
        tracing::info!(command = %self.name, "heartbeat");
        Ok(())
    }

    fn as_trigger(&mut self) -> Option<&mut dyn Trigger> {
        Some(self)
    }
}

impl Trigger for Heartbeat {
    fn timer(&mut self) -> &mut TriggerTimer {
        &mut self.timer
    }

    fn check_trigger(&mut self) -> bool {
        true
    }
}

/// Queued command whose only step fails
pub struct Faulty {
    lifecycle: Lifecycle,
    name: String,
}

impl Faulty {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            name: name.into(),
        }
    }
}

impl Describe for Faulty {
    fn description() -> &'static str {
        "Fails on its first step; counted as a failure"
    }
}

impl Command for Faulty {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn kind(&self) -> Option<CommandKind> {
        Some(CommandKind::Queued)
    }

    fn id(&self) -> String {
        self.name.clone()
    }

    fn handle_error(&mut self, _error: &CommandError) {}

    fn execute(&mut self, _delta: Duration) -> Result<(), CommandError> {
        Err(CommandError::failed(format!("{} failed on purpose", self.name)))
    }
}

/// How many of each demo command to schedule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workload {
    pub queued: u32,
    pub triggered: u32,
    pub stack: u32,
    pub faulty: u32,
    pub steps: u32,
    pub interval: Duration,
}

impl Workload {
    /// Commands expected to finish cleanly: every queued and triggered one,
    /// plus the stack as a whole
    pub fn expected_executed(&self) -> u64 {
        u64::from(self.queued) + u64::from(self.triggered) + u64::from(self.stack > 0)
    }
}

/// Add the workload to an engine; returns the number of commands added
pub fn schedule(engine: &Engine, workload: &Workload) -> Result<u32, EngineError> {
    let mut added = 0;
    for i in 0..workload.queued {
        engine.add_command(Countdown::new(format!("countdown-{i}"), workload.steps))?;
        added += 1;
    }
    for i in 0..workload.triggered {
        engine.add_command(Heartbeat::new(format!("heartbeat-{i}"), workload.interval))?;
        added += 1;
    }
    for i in 0..workload.faulty {
        engine.add_command(Faulty::new(format!("faulty-{i}")))?;
        added += 1;
    }
    if workload.stack > 0 {
        let stack = CommandStack::from_commands((0..workload.stack).map(|i| {
            Box::new(Countdown::new(format!("stage-{i}"), workload.steps)) as Box<dyn Command>
        }));
        engine.add_command(stack)?;
        added += 1;
    }
    Ok(added)
}

/// Registry of the demo command types
pub fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry
        .register::<Countdown>()
        .register::<Heartbeat>()
        .register::<Faulty>();
    registry
}

#[cfg(test)]
#[path = "demo_tests.rs"]
mod tests;
