// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn system_clock_returns_increasing_time() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(1));
    let t2 = clock.now();
    assert!(t2 > t1);
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::from_secs(30));
    let t2 = clock1.now();
    assert!(t2.duration_since(t1) >= Duration::from_secs(30));
}

#[parameterized(
    twenty_hz = { 20, 50 },
    one_hz = { 1, 1000 },
    zero_is_clamped = { 0, 1000 },
    thousand_hz = { 1000, 1 },
    above_resolution = { 5000, 0 },
)]
fn frame_time_divides_one_second(rate: u64, expected_ms: u64) {
    assert_eq!(frame_time(rate), Duration::from_millis(expected_ms));
}

#[parameterized(
    spare_budget = { 50, 20, 30 },
    exact_budget = { 50, 50, 1 },
    overrun = { 50, 80, 1 },
    zero_frame = { 0, 0, 1 },
)]
fn sleep_budget_never_drops_below_one_ms(frame_ms: u64, processing_ms: u64, expected_ms: u64) {
    let budget = sleep_budget(
        Duration::from_millis(frame_ms),
        Duration::from_millis(processing_ms),
    );
    assert_eq!(budget, Duration::from_millis(expected_ms));
}

#[test]
fn stopwatch_lap_resets_elapsed() {
    let clock = FakeClock::new();
    let mut watch = Stopwatch::new(clock.clone());

    clock.advance(Duration::from_millis(40));
    assert_eq!(watch.elapsed(), Duration::from_millis(40));
    assert_eq!(watch.lap(), Duration::from_millis(40));
    assert_eq!(watch.elapsed(), Duration::ZERO);

    clock.advance(Duration::from_millis(15));
    assert_eq!(watch.lap(), Duration::from_millis(15));
}
