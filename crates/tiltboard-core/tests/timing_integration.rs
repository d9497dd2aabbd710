//! Integration tests for the timing engine and the widgets built on it.

use proptest::prelude::*;
use tiltboard_core::{CountdownTimer, Event, Phase, Stopwatch, TimingEngine};

#[test]
fn countdown_of_five_seconds_completes_exactly_once() {
    let mut timer = CountdownTimer::new(5_000, 2_000);
    timer.start(100);
    let deltas = [16, 17, 16, 951, 1_000, 3_000];
    assert_eq!(deltas.iter().sum::<u64>(), 5_000);

    let mut now = 100;
    let mut fired = Vec::new();
    for delta in deltas {
        now += delta;
        fired.extend(timer.tick(now));
    }
    for extra in 1..=10 {
        fired.extend(timer.tick(now + extra * 16));
    }
    assert_eq!(fired.len(), 1);
    assert!(matches!(fired[0], Event::CountdownCompleted { .. }));
    assert_eq!(timer.phase(), Phase::Completed);
}

#[test]
fn stopwatch_lap_then_reset() {
    let mut sw = Stopwatch::new();
    sw.start(0);
    sw.tick(600);
    sw.tick(1_234);
    match sw.lap(1_234) {
        Some(Event::LapRecorded { readout, number, .. }) => {
            assert_eq!(readout, "00:01.234");
            assert_eq!(number, 1);
        }
        other => panic!("Expected LapRecorded, got {other:?}"),
    }
    sw.reset();
    assert!(sw.laps().is_empty());
    assert_eq!(sw.readout(), "00:00.000");
}

proptest! {
    /// Accumulated time equals the sum of running intervals, whatever the
    /// length of the pauses between them.
    #[test]
    fn pauses_never_count(
        segments in prop::collection::vec((1u64..5_000, 0u64..10_000_000, 1usize..8), 1..12)
    ) {
        let mut engine = TimingEngine::new();
        let mut now = 0u64;
        let mut expected = 0u64;
        for (running, gap, ticks) in segments {
            engine.start(now);
            let step = running / ticks as u64;
            for _ in 0..ticks {
                now += step;
                engine.tick(now);
            }
            let rest = running - step * ticks as u64;
            now += rest;
            engine.stop(now);
            expected += running;
            now += gap;
        }
        prop_assert_eq!(engine.accumulated_ms(), expected);
        prop_assert_eq!(engine.phase(), Phase::Paused);
    }
}
