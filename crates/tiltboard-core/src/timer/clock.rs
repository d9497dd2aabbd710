//! Time sources.
//!
//! Elapsed-time accumulation only ever reads [`Clock::monotonic_ms`]; the
//! wall clock is used for the alarm and the live clock readout.

use std::cell::Cell;
use std::time::Instant;

use chrono::{Duration, Local, NaiveDateTime};

pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Never decreases.
    fn monotonic_ms(&self) -> u64;

    /// Local wall-clock time.
    fn local_now(&self) -> NaiveDateTime;
}

/// Production clock backed by [`Instant`] and the system time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn monotonic_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Hand-driven clock for deterministic tests and replays.
///
/// Monotonic and wall time are independent so tests can jump the wall
/// clock without disturbing accumulated durations.
#[derive(Debug, Clone)]
pub struct ManualClock {
    monotonic: Cell<u64>,
    wall: Cell<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(wall: NaiveDateTime) -> Self {
        Self {
            monotonic: Cell::new(0),
            wall: Cell::new(wall),
        }
    }

    /// Advance both clocks by `ms`.
    pub fn advance(&self, ms: u64) {
        self.monotonic.set(self.monotonic.get().saturating_add(ms));
        self.wall.set(self.wall.get() + Duration::milliseconds(ms as i64));
    }

    /// Move the wall clock only, as a system time adjustment would.
    pub fn set_wall(&self, wall: NaiveDateTime) {
        self.wall.set(wall);
    }
}

impl Clock for ManualClock {
    fn monotonic_ms(&self) -> u64 {
        self.monotonic.get()
    }

    fn local_now(&self) -> NaiveDateTime {
        self.wall.get()
    }
}
