// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The engine: worker pool, command classification, start and stop

use crate::clock::{Clock, SystemClock};
use crate::command::{Command, CommandInfo, CommandKind};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::loops::{master_loop, parallel_loop, ActiveLoops};
use crate::scheduler::{Scheduler, Slot, Tally};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::runtime::{Handle, Runtime};
use tokio::sync::Notify;

/// State shared by the engine, its handles and its loops
pub(crate) struct Shared<C: Clock> {
    pub(crate) scheduler: Scheduler,
    pub(crate) clock: C,
    pub(crate) shutdown: Notify,
    pub(crate) loops: Arc<ActiveLoops>,
    tick_rate: AtomicU64,
    running: AtomicBool,
    debug: AtomicBool,
    closed: AtomicBool,
}

impl<C: Clock> Shared<C> {
    pub(crate) fn tick_rate(&self) -> u64 {
        self.tick_rate.load(Ordering::SeqCst)
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub(crate) fn is_debug(&self) -> bool {
        self.debug.load(Ordering::SeqCst)
    }
}

/// Builder for [`Engine`]
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    pub fn tick_rate(mut self, ticks_per_second: u64) -> Self {
        self.config.tick_rate = ticks_per_second;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    pub fn shutdown_grace(mut self, grace: Duration) -> Self {
        self.config.shutdown_grace = grace;
        self
    }

    pub fn build(self) -> Result<Engine, EngineError> {
        self.build_with_clock(SystemClock)
    }

    /// Build an engine whose loops measure time on `clock`
    pub fn build_with_clock<C: Clock>(self, clock: C) -> Result<Engine<C>, EngineError> {
        let config = self.config;
        config.validate()?;

        // Loops run on the blocking pool; one worker drives the timers and
        // the master loop gets a thread on top of the parallel budget
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(config.threads + 1)
            .thread_name("tickwork-worker")
            .enable_time()
            .build()?;

        let shared = Arc::new(Shared {
            scheduler: Scheduler::new(),
            clock,
            shutdown: Notify::new(),
            loops: Arc::new(ActiveLoops::default()),
            tick_rate: AtomicU64::new(config.tick_rate),
            running: AtomicBool::new(false),
            debug: AtomicBool::new(config.debug),
            closed: AtomicBool::new(false),
        });

        Ok(Engine {
            handle: EngineHandle {
                shared,
                pool: runtime.handle().clone(),
            },
            runtime: Mutex::new(Some(runtime)),
            threads: config.threads,
            grace: config.shutdown_grace,
        })
    }
}

/// Tick-driven command engine owning its worker pool
///
/// Dropping an engine without calling [`Engine::stop`] abandons its loops.
pub struct Engine<C: Clock = SystemClock> {
    handle: EngineHandle<C>,
    runtime: Mutex<Option<Runtime>>,
    threads: usize,
    grace: Duration,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        EngineBuilder {
            config: config.clone(),
        }
        .build()
    }
}

impl<C: Clock> Engine<C> {
    /// Begin ticking. Warns and does nothing if already running.
    pub fn start(&self) -> Result<(), EngineError> {
        let shared = &self.handle.shared;
        if shared.closed.load(Ordering::SeqCst) {
            return Err(EngineError::PoolShutDown);
        }
        if shared.running.swap(true, Ordering::SeqCst) {
            tracing::warn!("engine already running");
            return Ok(());
        }

        tracing::info!(
            threads = self.threads,
            tick_rate = shared.tick_rate(),
            "engine started"
        );
        let (shared, pool) = (Arc::clone(shared), self.handle.pool.clone());
        self.handle
            .pool
            .spawn_blocking(move || master_loop(shared, pool));
        Ok(())
    }

    /// Stop every loop and shut the pool down, returning the final tally
    ///
    /// Loops get the configured grace period to exit; after that the pool is
    /// shut down regardless. The engine cannot be restarted afterwards.
    pub fn stop(&self) -> Tally {
        let shared = &self.handle.shared;
        shared.running.store(false, Ordering::SeqCst);
        shared.shutdown.notify_waiters();

        let runtime = self
            .runtime
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(runtime) = runtime {
            shared.closed.store(true, Ordering::SeqCst);
            self.shut_down(runtime);
        }

        let tally = shared.scheduler.tally();
        tracing::info!(
            executed = tally.executed,
            failed = tally.failed,
            "engine stopped"
        );
        tally
    }

    fn shut_down(&self, runtime: Runtime) {
        if Handle::try_current().is_ok() {
            // Blocking here would stall the caller's own runtime
            tracing::warn!("engine stopped from async context; not waiting for loops");
            runtime.shutdown_background();
            return;
        }

        let started = Instant::now();
        let loops = Arc::clone(&self.handle.shared.loops);
        let idle = runtime.block_on(async {
            tokio::time::timeout(self.grace, loops.wait_idle())
                .await
                .is_ok()
        });
        if !idle {
            tracing::warn!(
                grace_ms = self.grace.as_millis() as u64,
                active = loops.count(),
                "loops still active after grace period, forcing shutdown"
            );
        }
        runtime.shutdown_timeout(self.grace.saturating_sub(started.elapsed()));
    }

    /// A cloneable handle for submitting work from commands or other threads
    pub fn handle(&self) -> EngineHandle<C> {
        self.handle.clone()
    }

    pub fn add_command<T: Command>(&self, command: T) -> Result<(), EngineError> {
        self.handle.add_command(command)
    }

    pub fn add_boxed(&self, command: Box<dyn Command>) -> Result<(), EngineError> {
        self.handle.add_boxed(command)
    }

    pub fn add_optional<T: Command>(&self, command: Option<T>) -> Result<(), EngineError> {
        self.handle.add_optional(command)
    }

    pub fn flush_commands(&self) {
        self.handle.flush_commands();
    }

    pub fn queued_commands(&self) -> Vec<CommandInfo> {
        self.handle.queued_commands()
    }

    pub fn triggered_commands(&self) -> Vec<CommandInfo> {
        self.handle.triggered_commands()
    }

    pub fn tick_rate(&self) -> u64 {
        self.handle.tick_rate()
    }

    pub fn set_tick_rate(&self, ticks_per_second: u64) {
        self.handle.set_tick_rate(ticks_per_second);
    }

    pub fn commands_executed(&self) -> u64 {
        self.handle.tally().executed
    }

    pub fn commands_failed(&self) -> u64 {
        self.handle.tally().failed
    }

    pub fn tally(&self) -> Tally {
        self.handle.tally()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    pub fn set_debug(&self, debug: bool) {
        self.handle.set_debug(debug);
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl<C: Clock> Drop for Engine<C> {
    fn drop(&mut self) {
        self.handle.shared.running.store(false, Ordering::SeqCst);
        self.handle.shared.shutdown.notify_waiters();
        let runtime = self
            .runtime
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(runtime) = runtime {
            runtime.shutdown_background();
        }
    }
}

/// Submits and inspects commands of a running engine
pub struct EngineHandle<C: Clock = SystemClock> {
    shared: Arc<Shared<C>>,
    pool: Handle,
}

impl<C: Clock> Clone for EngineHandle<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            pool: self.pool.clone(),
        }
    }
}

impl<C: Clock> EngineHandle<C> {
    pub fn add_command<T: Command>(&self, command: T) -> Result<(), EngineError> {
        self.add_boxed(Box::new(command))
    }

    /// Add a command that may not have resolved; `None` is rejected
    pub fn add_optional<T: Command>(&self, command: Option<T>) -> Result<(), EngineError> {
        match command {
            Some(command) => self.add_command(command),
            None => Err(EngineError::InvalidCommand("no command given".into())),
        }
    }

    /// Classify and schedule a command: queued, then parallel, then triggered
    pub fn add_boxed(&self, mut command: Box<dyn Command>) -> Result<(), EngineError> {
        let shared = &self.shared;
        if shared.closed.load(Ordering::SeqCst) {
            return Err(EngineError::PoolShutDown);
        }

        let id = command.id();
        match command.kind() {
            Some(CommandKind::Queued) => {
                let queue_len = shared.scheduler.push_queued(command);
                if shared.is_debug() {
                    tracing::info!(command = %id, queue_len, "queued command added");
                }
            }
            Some(CommandKind::Parallel) => {
                command.start();
                let (slot, pool) = (Slot::new(command), self.pool.clone());
                let owner = Arc::clone(shared);
                self.pool
                    .spawn_blocking(move || parallel_loop(owner, pool, slot));
                if shared.is_debug() {
                    tracing::info!(command = %id, "parallel command submitted");
                }
            }
            Some(CommandKind::Triggered) => {
                if command.as_trigger().is_none() {
                    return Err(EngineError::InvalidCommand(format!(
                        "{id} is triggered but cannot be polled"
                    )));
                }
                command.start();
                let pending = shared.scheduler.push_triggered(command);
                if shared.is_debug() {
                    tracing::info!(command = %id, pending, "triggered command added");
                }
            }
            None => {
                return Err(EngineError::InvalidCommand(format!(
                    "{id} has no scheduling kind"
                )));
            }
        }
        Ok(())
    }

    /// Drop every pending queued and triggered command
    ///
    /// Parallel loops already running are unaffected.
    pub fn flush_commands(&self) {
        let (queued, triggered) = self.shared.scheduler.flush();
        if self.shared.is_debug() {
            tracing::info!(queued, triggered, "flushed commands");
        }
    }

    pub fn queued_commands(&self) -> Vec<CommandInfo> {
        self.shared.scheduler.queued_commands()
    }

    pub fn triggered_commands(&self) -> Vec<CommandInfo> {
        self.shared.scheduler.triggered_commands()
    }

    pub fn tick_rate(&self) -> u64 {
        self.shared.tick_rate()
    }

    /// Takes effect on the next frame of every loop
    pub fn set_tick_rate(&self, ticks_per_second: u64) {
        self.shared
            .tick_rate
            .store(ticks_per_second, Ordering::SeqCst);
    }

    pub fn tally(&self) -> Tally {
        self.shared.scheduler.tally()
    }

    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    pub fn set_debug(&self, debug: bool) {
        self.shared.debug.store(debug, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
