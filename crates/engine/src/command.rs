// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command lifecycle and the authoring contract
//!
//! A command moves through three states derived from two atomic flags:
//! - Created: not running, not finished
//! - Running: running, not finished
//! - Finished: not running, finished (terminal)
//!
//! The flags live behind an `Arc` so a caller can keep a [`Lifecycle`] clone
//! and observe a command after handing it to the engine.

use crate::trigger::Trigger;
use serde::Serialize;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a command body
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Failed(String),
    #[error("command panicked: {0}")]
    Panicked(String),
    #[error("child {id} failed: {source}")]
    Child {
        id: String,
        #[source]
        source: Box<CommandError>,
    },
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CommandError {
    pub fn failed(message: impl Into<String>) -> Self {
        CommandError::Failed(message.into())
    }
}

/// Scheduling discipline of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Drained one at a time, FIFO, by the master tick
    Queued,
    /// Runs in its own loop on the worker pool
    Parallel,
    /// Polled every tick against a predicate; fires once
    Triggered,
}

/// Observable state of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandState {
    Created,
    Running,
    Finished,
}

impl std::fmt::Display for CommandState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CommandState::Created => "created",
            CommandState::Running => "running",
            CommandState::Finished => "finished",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default)]
struct Flags {
    running: AtomicBool,
    finished: AtomicBool,
}

/// Shared running/finished flags of one command
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    flags: Arc<Flags>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.flags.running.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.flags.finished.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> CommandState {
        if self.is_finished() {
            CommandState::Finished
        } else if self.is_running() {
            CommandState::Running
        } else {
            CommandState::Created
        }
    }

    /// Created → Running. Returns false if the command already finished.
    pub fn start(&self, id: &str) -> bool {
        if self.is_finished() {
            tracing::debug!(command = id, "tried to start a finished command");
            return false;
        }
        self.flags.running.store(true, Ordering::SeqCst);
        tracing::debug!(command = id, "started");
        true
    }

    /// Clears `running` without finishing
    pub fn stop(&self, id: &str) {
        self.flags.running.store(false, Ordering::SeqCst);
        tracing::debug!(command = id, "stopped");
    }

    /// Any state → Finished. Returns true only on the first transition.
    pub fn finish(&self, id: &str) -> bool {
        // Clear running first so observers never see finished && running
        self.flags.running.store(false, Ordering::SeqCst);
        let first = !self.flags.finished.swap(true, Ordering::SeqCst);
        if first {
            tracing::debug!(command = id, "finished");
        }
        first
    }
}

/// A unit of work the engine can schedule
///
/// Implementors own a [`Lifecycle`] and report their [`CommandKind`]. Only
/// `lifecycle`, `kind` and `handle_error` are required; `execute` defaults to a
/// no-op so marker-style commands stay short.
pub trait Command: Send + 'static {
    fn lifecycle(&self) -> &Lifecycle;

    /// Discipline the engine should use, or `None` if it cannot be scheduled
    fn kind(&self) -> Option<CommandKind>;

    /// Called by the command itself when its own work fails.
    /// The engine never calls this.
    fn handle_error(&mut self, error: &CommandError);

    /// One step of work; `delta` is the time since this command's previous step
    fn execute(&mut self, delta: Duration) -> Result<(), CommandError> {
        let _ = delta;
        Ok(())
    }

    /// Identifier used in logs; defaults to the type name
    fn id(&self) -> String {
        short_type_name(std::any::type_name::<Self>()).to_string()
    }

    /// Trigger capability, present only on triggered commands
    fn as_trigger(&mut self) -> Option<&mut dyn Trigger> {
        None
    }

    fn start(&mut self) {
        self.lifecycle().start(&self.id());
    }

    fn stop(&mut self) {
        self.lifecycle().stop(&self.id());
    }

    fn finish(&mut self) {
        self.lifecycle().finish(&self.id());
    }

    fn is_running(&self) -> bool {
        self.lifecycle().is_running()
    }

    fn is_finished(&self) -> bool {
        self.lifecycle().is_finished()
    }

    fn state(&self) -> CommandState {
        self.lifecycle().state()
    }
}

/// Read-only view of a scheduled command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandInfo {
    pub id: String,
    pub state: CommandState,
}

/// Strip module paths and generic arguments from a type name
pub(crate) fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Run a command body, turning a panic into [`CommandError::Panicked`]
pub(crate) fn guarded<F>(body: F) -> Result<(), CommandError>
where
    F: FnOnce() -> Result<(), CommandError>,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => result,
        Err(payload) => Err(CommandError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
