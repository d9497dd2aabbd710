//! Drift-corrected timing engine.
//!
//! Elapsed time is the sum of deltas between consecutive monotonic samples
//! taken while running. Pauses contribute nothing and wall-clock changes
//! cannot reach the total. No internal thread: the caller feeds `tick()`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ...
//!            \-> Completed (countdowns only, left via reset)
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingEngine {
    phase: Phase,
    accumulated_ms: u64,
    /// Monotonic instant of the last sample; `Some` only while running.
    #[serde(default)]
    last_sample_ms: Option<u64>,
}

impl Default for TimingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingEngine {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            accumulated_ms: 0,
            last_sample_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    pub fn last_sample_ms(&self) -> Option<u64> {
        self.last_sample_ms
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume accumulating from `now`. Returns false when already
    /// running or completed.
    pub fn start(&mut self, now: u64) -> bool {
        match self.phase {
            Phase::Idle | Phase::Paused => {
                self.phase = Phase::Running;
                self.last_sample_ms = Some(now);
                true
            }
            Phase::Running | Phase::Completed => false,
        }
    }

    /// Fold the time since the previous sample into the total. Returns the
    /// delta added; zero when not running.
    pub fn tick(&mut self, now: u64) -> u64 {
        if self.phase != Phase::Running {
            return 0;
        }
        let Some(last) = self.last_sample_ms else {
            self.last_sample_ms = Some(now);
            return 0;
        };
        // A sample older than the last one contributes nothing.
        let delta = now.saturating_sub(last);
        self.accumulated_ms = self.accumulated_ms.saturating_add(delta);
        self.last_sample_ms = Some(now.max(last));
        delta
    }

    /// Take a final sample and pause. Returns false if not running.
    pub fn stop(&mut self, now: u64) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.tick(now);
        self.phase = Phase::Paused;
        self.last_sample_ms = None;
        true
    }

    /// Freeze in the terminal phase; only `reset` leaves it.
    pub fn complete(&mut self) {
        self.phase = Phase::Completed;
        self.last_sample_ms = None;
    }

    pub fn reset(&mut self, initial_ms: u64) {
        self.phase = Phase::Idle;
        self.accumulated_ms = initial_ms;
        self.last_sample_ms = None;
    }
}
