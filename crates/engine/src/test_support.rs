// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commands shared by the unit tests

use crate::command::{Command, CommandError, CommandKind, Lifecycle};
use crate::trigger::{Trigger, TriggerTimer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared, ordered record of what commands did
#[derive(Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }
}

/// How a [`Step`] behaves when executed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Succeed,
    Fail,
    Panic,
}

/// Finishes after a fixed number of executes, journaling each call
pub struct Step {
    pub lifecycle: Lifecycle,
    pub name: String,
    pub kind: Option<CommandKind>,
    pub steps: u32,
    pub outcome: Outcome,
    pub journal: Journal,
    pub deltas: Arc<Mutex<Vec<Duration>>>,
    done: u32,
}

impl Step {
    pub fn queued(name: &str, steps: u32, journal: &Journal) -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            name: name.to_string(),
            kind: Some(CommandKind::Queued),
            steps,
            outcome: Outcome::Succeed,
            journal: journal.clone(),
            deltas: Arc::new(Mutex::new(Vec::new())),
            done: 0,
        }
    }

    pub fn parallel(name: &str, steps: u32, journal: &Journal) -> Self {
        Self {
            kind: Some(CommandKind::Parallel),
            ..Self::queued(name, steps, journal)
        }
    }

    pub fn unscheduled(name: &str, journal: &Journal) -> Self {
        Self {
            kind: None,
            ..Self::queued(name, 1, journal)
        }
    }

    pub fn failing(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }
}

impl Command for Step {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn kind(&self) -> Option<CommandKind> {
        self.kind
    }

    fn id(&self) -> String {
        self.name.clone()
    }

    fn handle_error(&mut self, _error: &CommandError) {
        self.journal.record(format!("{}:handle_error", self.name));
    }

    fn start(&mut self) {
        self.journal.record(format!("{}:start", self.name));
        self.lifecycle.start(&self.name);
    }

    fn execute(&mut self, delta: Duration) -> Result<(), CommandError> {
        self.journal.record(format!("{}:execute", self.name));
        self.deltas.lock().unwrap().push(delta);
        match self.outcome {
            Outcome::Succeed => {}
            Outcome::Fail => return Err(CommandError::failed(format!("{} failed", self.name))),
            Outcome::Panic => panic!("{} panicked", self.name),
        }
        self.done += 1;
        if self.done >= self.steps {
            self.finish();
        }
        Ok(())
    }

    fn finish(&mut self) {
        if self.lifecycle.finish(&self.name) {
            self.journal.record(format!("{}:finish", self.name));
        }
    }
}

/// Triggered command whose predicate is controlled by the test
pub struct Gate {
    pub lifecycle: Lifecycle,
    pub name: String,
    pub timer: TriggerTimer,
    pub open: Arc<AtomicBool>,
    pub outcome: Outcome,
    pub journal: Journal,
    pub with_capability: bool,
}

impl Gate {
    pub fn new(name: &str, interval: Duration, open: bool, journal: &Journal) -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            name: name.to_string(),
            timer: TriggerTimer::with_interval(interval),
            open: Arc::new(AtomicBool::new(open)),
            outcome: Outcome::Succeed,
            journal: journal.clone(),
            with_capability: true,
        }
    }

    pub fn failing(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }
}

impl Command for Gate {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn kind(&self) -> Option<CommandKind> {
        Some(CommandKind::Triggered)
    }

    fn id(&self) -> String {
        self.name.clone()
    }

    fn handle_error(&mut self, _error: &CommandError) {}

    fn finish(&mut self) {
        if self.lifecycle.finish(&self.name) {
            self.journal.record(format!("{}:finish", self.name));
        }
    }

    fn execute(&mut self, _delta: Duration) -> Result<(), CommandError> {
        self.journal.record(format!("{}:fire", self.name));
        match self.outcome {
            Outcome::Succeed => Ok(()),
            Outcome::Fail => Err(CommandError::failed("gate jammed")),
            Outcome::Panic => panic!("gate exploded"),
        }
    }

    fn as_trigger(&mut self) -> Option<&mut dyn Trigger> {
        if self.with_capability {
            Some(self)
        } else {
            None
        }
    }
}

impl Trigger for Gate {
    fn timer(&mut self) -> &mut TriggerTimer {
        &mut self.timer
    }

    fn check_trigger(&mut self) -> bool {
        self.journal.record(format!("{}:check", self.name));
        self.open.load(Ordering::SeqCst)
    }
}
