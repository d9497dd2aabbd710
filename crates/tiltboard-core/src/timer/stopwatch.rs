use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::engine::{Phase, TimingEngine};
use super::frame::{FrameHandle, FrameLoop};
use crate::events::Event;
use crate::format::format_millis;

/// An immutable elapsed-time snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    /// 1-based, in recording order.
    pub number: usize,
    pub elapsed_ms: u64,
}

impl Lap {
    pub fn readout(&self) -> String {
        format_millis(self.elapsed_ms)
    }
}

/// Forward-counting stopwatch with laps.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    engine: TimingEngine,
    laps: Vec<Lap>,
    frames: FrameLoop,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.engine.accumulated_ms()
    }

    pub fn readout(&self) -> String {
        format_millis(self.elapsed_ms())
    }

    pub fn status(&self) -> &'static str {
        match self.phase() {
            Phase::Running => "Running",
            Phase::Paused => "Stopped",
            Phase::Idle | Phase::Completed => "Ready",
        }
    }

    /// Laps in recording order.
    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Laps as displayed, newest first.
    pub fn laps_newest_first(&self) -> impl Iterator<Item = &Lap> {
        self.laps.iter().rev()
    }

    pub fn frame_handle(&self) -> Option<FrameHandle> {
        self.frames.active()
    }

    pub fn start(&mut self, now: u64) -> Option<Event> {
        if !self.engine.start(now) {
            return None;
        }
        self.frames.request();
        tracing::debug!(elapsed_ms = self.elapsed_ms(), "stopwatch started");
        Some(Event::StopwatchStarted {
            elapsed_ms: self.elapsed_ms(),
            at: Utc::now(),
        })
    }

    pub fn stop(&mut self, now: u64) -> Option<Event> {
        self.frames.cancel();
        if !self.engine.stop(now) {
            return None;
        }
        tracing::debug!(elapsed_ms = self.elapsed_ms(), "stopwatch stopped");
        Some(Event::StopwatchStopped {
            elapsed_ms: self.elapsed_ms(),
            at: Utc::now(),
        })
    }

    /// Zero the total and discard all laps.
    pub fn reset(&mut self) -> Option<Event> {
        self.frames.cancel();
        self.engine.reset(0);
        self.laps.clear();
        Some(Event::StopwatchReset { at: Utc::now() })
    }

    pub fn tick(&mut self, now: u64) -> u64 {
        self.engine.tick(now)
    }

    /// Record the current elapsed value. Works in any phase.
    pub fn lap(&mut self, now: u64) -> Option<Event> {
        self.engine.tick(now);
        let lap = Lap {
            number: self.laps.len() + 1,
            elapsed_ms: self.elapsed_ms(),
        };
        self.laps.push(lap);
        Some(Event::LapRecorded {
            number: lap.number,
            elapsed_ms: lap.elapsed_ms,
            readout: lap.readout(),
            at: Utc::now(),
        })
    }

    pub fn on_frame(&mut self, handle: FrameHandle, now: u64) -> u64 {
        if !self.frames.accepts(handle) {
            tracing::warn!(handle = handle.id(), "dropping stale stopwatch frame");
            return 0;
        }
        self.tick(now)
    }
}
