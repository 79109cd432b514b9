// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The master tick loop and the per-command parallel loops
//!
//! Each loop owns a thread from the runtime's blocking pool, so a command body
//! that blocks stretches only its own loop. Pauses between frames wait on the
//! runtime's timers and end early on the shutdown signal.

use crate::clock::{frame_time, sleep_budget, Clock, Stopwatch, MIN_SLEEP};
use crate::command::guarded;
use crate::engine::Shared;
use crate::scheduler::Slot;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Notify;

/// Count of live loops, with a wakeup when it reaches zero
#[derive(Default)]
pub(crate) struct ActiveLoops {
    count: AtomicUsize,
    idle: Notify,
}

impl ActiveLoops {
    pub(crate) fn enter(self: &Arc<Self>) -> LoopGuard {
        self.count.fetch_add(1, Ordering::SeqCst);
        LoopGuard {
            loops: Arc::clone(self),
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Resolve once no loop is live
    pub(crate) async fn wait_idle(&self) {
        loop {
            // Register before checking so a concurrent exit cannot be missed
            let notified = self.idle.notified();
            if self.count() == 0 {
                return;
            }
            notified.await;
        }
    }
}

pub(crate) struct LoopGuard {
    loops: Arc<ActiveLoops>,
}

impl Drop for LoopGuard {
    fn drop(&mut self) {
        if self.loops.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.loops.idle.notify_waiters();
        }
    }
}

/// Block for `pause`; returns false if the engine stopped or shutdown was
/// signalled first
fn pause<C: Clock>(shared: &Shared<C>, pool: &Handle, pause: Duration) -> bool {
    if !shared.is_running() {
        return false;
    }
    pool.block_on(async {
        tokio::select! {
            _ = tokio::time::sleep(pause) => true,
            _ = shared.shutdown.notified() => false,
        }
    })
}

pub(crate) fn master_loop<C: Clock>(shared: Arc<Shared<C>>, pool: Handle) {
    let _guard = shared.loops.enter();
    let mut watch = Stopwatch::new(shared.clock.clone());
    tracing::info!(tick_rate = shared.tick_rate(), "tick loop started");

    while shared.is_running() {
        let delta = watch.lap();
        let tick = guarded(|| {
            shared.scheduler.tick(delta);
            Ok(())
        });
        if let Err(e) = tick {
            tracing::error!(error = %e, "tick failed");
        }

        let frame = frame_time(shared.tick_rate());
        if !pause(&shared, &pool, sleep_budget(frame, watch.elapsed())) {
            break;
        }
    }

    tracing::info!("tick loop stopped");
}

pub(crate) fn parallel_loop<C: Clock>(shared: Arc<Shared<C>>, pool: Handle, slot: Arc<Slot>) {
    let _guard = shared.loops.enter();
    let mut watch = Stopwatch::new(shared.clock.clone());

    while slot.lifecycle().is_running() && shared.is_running() {
        if watch.elapsed() < frame_time(shared.tick_rate()) {
            if !pause(&shared, &pool, MIN_SLEEP) {
                break;
            }
            continue;
        }

        let delta = watch.lap();
        let result = {
            let mut command = slot.command();
            guarded(|| command.execute(delta))
        };
        if let Err(e) = result {
            tracing::error!(command = slot.id(), discipline = "parallel", error = %e, "command failed");
            slot.command().finish();
            shared.scheduler.record_failed();
            return;
        }
    }

    shared.scheduler.record_executed();
    if shared.is_debug() {
        tracing::info!(command = slot.id(), "parallel command exited");
    }
}
