// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queued command that runs a closure once

use crate::command::{guarded, Command, CommandError, CommandKind, Lifecycle};
use std::time::Duration;

type Action = Box<dyn FnOnce() -> Result<(), CommandError> + Send>;
type ErrorHook = Box<dyn FnMut(&CommandError) + Send>;

/// A queued command wrapping a one-shot closure
///
/// The closure's failure (error or panic) is handed to the error hook and the
/// command still finishes, so the engine counts it as executed.
pub struct InstantCommand {
    lifecycle: Lifecycle,
    name: String,
    action: Option<Action>,
    on_error: Option<ErrorHook>,
}

impl InstantCommand {
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() -> Result<(), CommandError> + Send + 'static,
    {
        Self {
            lifecycle: Lifecycle::new(),
            name: "InstantCommand".to_string(),
            action: Some(Box::new(action)),
            on_error: None,
        }
    }

    /// Name used in logs instead of the type name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&CommandError) + Send + 'static,
    {
        self.on_error = Some(Box::new(hook));
        self
    }
}

impl Command for InstantCommand {
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
        tracing::warn!(command = %self.name, error = %error, "instant command failed");
        if let Some(hook) = self.on_error.as_mut() {
            hook(error);
        }
    }

    fn execute(&mut self, _delta: Duration) -> Result<(), CommandError> {
        if let Some(action) = self.action.take() {
            if let Err(e) = guarded(action) {
                self.handle_error(&e);
            }
        }
        self.finish();
        Ok(())
    }
}

#[cfg(test)]
#[path = "instant_tests.rs"]
mod tests;
