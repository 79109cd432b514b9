// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction and frame pacing for the tick loops

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Shortest pause between two ticks of any loop
pub const MIN_SLEEP: Duration = Duration::from_millis(1);

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += duration;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Target duration of one frame at the given rate
///
/// A rate of zero is treated as one tick per second.
pub fn frame_time(ticks_per_second: u64) -> Duration {
    Duration::from_millis(1000 / ticks_per_second.max(1))
}

/// How long a loop should sleep after spending `processing` of a `frame`
pub fn sleep_budget(frame: Duration, processing: Duration) -> Duration {
    frame.saturating_sub(processing).max(MIN_SLEEP)
}

/// Measures the time between successive laps on a clock
#[derive(Clone)]
pub struct Stopwatch<C: Clock> {
    clock: C,
    last: Instant,
}

impl<C: Clock> Stopwatch<C> {
    pub fn new(clock: C) -> Self {
        let last = clock.now();
        Self { clock, last }
    }

    /// Time since the last lap, without resetting
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.last)
    }

    /// Time since the last lap; starts a new lap
    pub fn lap(&mut self) -> Duration {
        let now = self.clock.now();
        let delta = now.saturating_duration_since(self.last);
        self.last = now;
        delta
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
