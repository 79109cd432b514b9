// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential composite: a parallel command that runs children one at a time

use crate::command::{Command, CommandError, CommandKind, Lifecycle};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Children = Arc<Mutex<Sequence>>;
type Hook = Box<dyn FnMut(Duration) + Send>;

/// Pending children plus whether the front child is out being executed
#[derive(Default)]
struct Sequence {
    queue: VecDeque<Box<dyn Command>>,
    in_flight: bool,
}

impl Sequence {
    fn len(&self) -> usize {
        self.queue.len() + usize::from(self.in_flight)
    }
}

/// A parallel command that drives an ordered sequence of children
///
/// Each `execute` steps only the front child. The stack finishes on an
/// `execute` that finds its sequence empty, so a child pushed after the last
/// one completes still runs.
pub struct CommandStack {
    lifecycle: Lifecycle,
    children: Children,
    on_execute: Option<Hook>,
}

/// Appends children to a running stack from other threads
#[derive(Clone)]
pub struct StackHandle {
    children: Children,
}

impl StackHandle {
    pub fn push<C: Command>(&self, command: C) {
        self.push_boxed(Box::new(command));
    }

    pub fn push_boxed(&self, command: Box<dyn Command>) {
        lock(&self.children).queue.push_back(command);
    }

    /// Children not yet finished, counting one that is mid-step
    pub fn len(&self) -> usize {
        lock(&self.children).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CommandStack {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandStack {
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            children: Arc::new(Mutex::new(Sequence::default())),
            on_execute: None,
        }
    }

    pub fn from_commands(commands: impl IntoIterator<Item = Box<dyn Command>>) -> Self {
        let stack = Self::new();
        lock(&stack.children).queue.extend(commands);
        stack
    }

    /// Append a child (builder form)
    pub fn with<C: Command>(self, command: C) -> Self {
        lock(&self.children).queue.push_back(Box::new(command));
        self
    }

    /// Hook run after every `execute`, including the one that finishes the stack
    pub fn on_execute<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Duration) + Send + 'static,
    {
        self.on_execute = Some(Box::new(hook));
        self
    }

    pub fn handle(&self) -> StackHandle {
        StackHandle {
            children: Arc::clone(&self.children),
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.children).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn step(&mut self, delta: Duration) -> Result<(), CommandError> {
        // The front child runs outside the lock so it may push to this stack
        let front = {
            let mut children = lock(&self.children);
            let front = children.queue.pop_front();
            children.in_flight = front.is_some();
            front
        };
        let Some(mut child) = front else {
            self.finish();
            return Ok(());
        };

        if !child.is_running() {
            child.start();
        }
        let result = child.execute(delta);
        let done = result.is_ok() && child.is_finished();
        let id = child.id();

        {
            let mut children = lock(&self.children);
            if !done {
                children.queue.push_front(child);
            }
            children.in_flight = false;
        }

        result.map_err(|e| CommandError::Child {
            id,
            source: Box::new(e),
        })
    }
}

impl Command for CommandStack {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn kind(&self) -> Option<CommandKind> {
        Some(CommandKind::Parallel)
    }

    fn handle_error(&mut self, error: &CommandError) {
        tracing::warn!(command = "CommandStack", error = %error, "stack step failed");
    }

    fn execute(&mut self, delta: Duration) -> Result<(), CommandError> {
        let result = self.step(delta);
        if let Some(hook) = self.on_execute.as_mut() {
            hook(delta);
        }
        result
    }
}

fn lock(children: &Children) -> std::sync::MutexGuard<'_, Sequence> {
    children.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
#[path = "stack_tests.rs"]
mod tests;
