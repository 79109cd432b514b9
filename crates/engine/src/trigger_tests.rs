// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::command::{CommandKind, Lifecycle};
use proptest::prelude::*;

struct Doorbell {
    lifecycle: Lifecycle,
    timer: TriggerTimer,
    pressed: bool,
    checks: u32,
    rings: u32,
}

impl Doorbell {
    fn new(interval_ms: u64, pressed: bool) -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            timer: TriggerTimer::with_interval(Duration::from_millis(interval_ms)),
            pressed,
            checks: 0,
            rings: 0,
        }
    }
}

impl Command for Doorbell {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn kind(&self) -> Option<CommandKind> {
        Some(CommandKind::Triggered)
    }

    fn handle_error(&mut self, _error: &CommandError) {}

    fn execute(&mut self, _delta: Duration) -> Result<(), CommandError> {
        self.rings += 1;
        Ok(())
    }

    fn as_trigger(&mut self) -> Option<&mut dyn Trigger> {
        Some(self)
    }
}

impl Trigger for Doorbell {
    fn timer(&mut self) -> &mut TriggerTimer {
        &mut self.timer
    }

    fn check_trigger(&mut self) -> bool {
        self.checks += 1;
        self.pressed
    }
}

#[test]
fn default_interval_is_one_second() {
    assert_eq!(TriggerTimer::new().interval(), Duration::from_secs(1));
}

#[test]
fn timer_fires_when_interval_reached() {
    let mut timer = TriggerTimer::with_interval(Duration::from_millis(100));
    assert!(!timer.advance(Duration::from_millis(60)));
    assert_eq!(timer.accumulated(), Duration::from_millis(60));
    assert!(timer.advance(Duration::from_millis(40)));
    assert_eq!(timer.accumulated(), Duration::ZERO);
}

#[test]
fn zero_interval_fires_every_advance() {
    let mut timer = TriggerTimer::with_interval(Duration::ZERO);
    assert!(timer.advance(Duration::ZERO));
    assert!(timer.advance(Duration::from_millis(3)));
}

#[test]
fn tick_fires_once_interval_elapses_then_finishes() {
    let mut bell = Doorbell::new(100, true);
    bell.start();

    bell.tick(Duration::from_millis(50)).unwrap();
    assert_eq!(bell.checks, 0);
    assert_eq!(bell.rings, 0);

    bell.tick(Duration::from_millis(50)).unwrap();
    assert_eq!(bell.checks, 1);
    assert_eq!(bell.rings, 1);
    assert!(bell.is_finished());
}

#[test]
fn false_predicate_never_executes_but_resets_the_timer() {
    let mut bell = Doorbell::new(100, false);
    bell.start();

    for _ in 0..10 {
        bell.tick(Duration::from_millis(100)).unwrap();
    }
    assert_eq!(bell.checks, 10);
    assert_eq!(bell.rings, 0);
    assert!(!bell.is_finished());
    assert_eq!(bell.timer.accumulated(), Duration::ZERO);
}

#[test]
fn set_interval_changes_cadence() {
    let mut bell = Doorbell::new(1000, false);
    bell.timer().set_interval(Duration::from_millis(10));
    bell.tick(Duration::from_millis(10)).unwrap();
    assert_eq!(bell.checks, 1);
}

proptest! {
    #[test]
    fn accumulated_stays_below_interval(
        interval in 1..500u64,
        deltas in proptest::collection::vec(0..300u64, 0..50)
    ) {
        let mut timer = TriggerTimer::with_interval(Duration::from_millis(interval));
        for delta in deltas {
            timer.advance(Duration::from_millis(delta));
            prop_assert!(timer.accumulated() < timer.interval());
        }
    }
}
