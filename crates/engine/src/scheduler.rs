// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tick-driven scheduling of queued and triggered commands
//!
//! Collections hold `Arc<Slot>` entries and are locked only to push, peek or
//! remove. Command bodies run outside those locks, so callers may append or
//! flush from any thread while a step is in progress.

use crate::command::{guarded, Command, CommandError, CommandInfo, Lifecycle};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Executed and failed command counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub executed: u64,
    pub failed: u64,
}

/// One scheduled command plus the metadata readable without locking it
pub(crate) struct Slot {
    id: String,
    lifecycle: Lifecycle,
    command: Mutex<Box<dyn Command>>,
}

impl Slot {
    pub(crate) fn new(command: Box<dyn Command>) -> Arc<Self> {
        Arc::new(Self {
            id: command.id(),
            lifecycle: command.lifecycle().clone(),
            command: Mutex::new(command),
        })
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub(crate) fn command(&self) -> MutexGuard<'_, Box<dyn Command>> {
        self.command.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn info(&self) -> CommandInfo {
        CommandInfo {
            id: self.id.clone(),
            state: self.lifecycle.state(),
        }
    }
}

/// Owns the queued and triggered collections and the tallies
#[derive(Default)]
pub(crate) struct Scheduler {
    queued: Mutex<VecDeque<Arc<Slot>>>,
    triggered: Mutex<Vec<Arc<Slot>>>,
    executed: AtomicU64,
    failed: AtomicU64,
}

impl Scheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append to the queue tail; returns the new queue length
    pub(crate) fn push_queued(&self, command: Box<dyn Command>) -> usize {
        let mut queued = self.queued();
        queued.push_back(Slot::new(command));
        queued.len()
    }

    pub(crate) fn push_triggered(&self, command: Box<dyn Command>) -> usize {
        let mut triggered = self.triggered();
        triggered.push(Slot::new(command));
        triggered.len()
    }

    /// One master tick: a queued-drain step, then a triggered-poll step
    pub(crate) fn tick(&self, delta: Duration) {
        self.drain_queued(delta);
        self.poll_triggered(delta);
    }

    /// Advance the head of the queue by one step
    pub(crate) fn drain_queued(&self, delta: Duration) {
        let Some(head) = self.queued().front().cloned() else {
            return;
        };

        if head.lifecycle().is_finished() {
            // Stale entry, e.g. finished by its owner before its turn
            self.remove_queued(&head);
            return;
        }

        let result = {
            let mut command = head.command();
            guarded(|| {
                if !command.is_running() {
                    command.start();
                }
                command.execute(delta)
            })
        };

        match result {
            Ok(()) => {
                if head.lifecycle().is_finished() {
                    self.remove_queued(&head);
                    self.record_executed();
                }
            }
            Err(e) => {
                self.evict_failed(&head, &e, "queued");
                self.remove_queued(&head);
            }
        }
    }

    /// Tick every triggered command once, evicting the ones that finished
    pub(crate) fn poll_triggered(&self, delta: Duration) {
        let snapshot: Vec<Arc<Slot>> = self.triggered().clone();

        for slot in snapshot {
            let result = {
                let mut command = slot.command();
                guarded(|| match command.as_trigger() {
                    Some(trigger) => trigger.tick(delta),
                    None => Err(CommandError::failed("command has no trigger")),
                })
            };

            match result {
                Ok(()) => {
                    if slot.lifecycle().is_finished() {
                        self.remove_triggered(&slot);
                        self.record_executed();
                    }
                }
                Err(e) => {
                    self.evict_failed(&slot, &e, "triggered");
                    self.remove_triggered(&slot);
                }
            }
        }
    }

    /// Clear both collections under their locks
    pub(crate) fn flush(&self) -> (usize, usize) {
        let mut queued = self.queued();
        let mut triggered = self.triggered();
        let counts = (queued.len(), triggered.len());
        queued.clear();
        triggered.clear();
        counts
    }

    pub(crate) fn queued_commands(&self) -> Vec<CommandInfo> {
        self.queued().iter().map(|slot| slot.info()).collect()
    }

    pub(crate) fn triggered_commands(&self) -> Vec<CommandInfo> {
        self.triggered().iter().map(|slot| slot.info()).collect()
    }

    pub(crate) fn record_executed(&self) {
        self.executed.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn tally(&self) -> Tally {
        Tally {
            executed: self.executed.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
        }
    }

    fn evict_failed(&self, slot: &Slot, error: &CommandError, discipline: &'static str) {
        tracing::error!(command = slot.id(), discipline, error = %error, "command failed");
        slot.command().finish();
        self.record_failed();
    }

    fn remove_queued(&self, slot: &Arc<Slot>) {
        let mut queued = self.queued();
        if queued.front().is_some_and(|head| Arc::ptr_eq(head, slot)) {
            queued.pop_front();
        } else {
            queued.retain(|s| !Arc::ptr_eq(s, slot));
        }
    }

    fn remove_triggered(&self, slot: &Arc<Slot>) {
        self.triggered().retain(|s| !Arc::ptr_eq(s, slot));
    }

    fn queued(&self) -> MutexGuard<'_, VecDeque<Arc<Slot>>> {
        self.queued.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn triggered(&self) -> MutexGuard<'_, Vec<Arc<Slot>>> {
        self.triggered.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
