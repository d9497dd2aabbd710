//! Countdown timer built on [`TimingEngine`].
//!
//! `remaining = max(0, initial - accumulated)`. The tick on which it first
//! reaches zero completes the countdown and raises the alert; nothing else
//! happens until an explicit reset.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::engine::{Phase, TimingEngine};
use super::frame::{FrameHandle, FrameLoop};
use crate::alert::AlertSignal;
use crate::events::Event;
use crate::format::format_millis;

/// Minutes/seconds entry fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationInput {
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationInput {
    pub fn new(minutes: u64, seconds: u64) -> Self {
        Self { minutes, seconds }
    }

    /// Parse raw field text. Blank or malformed fields count as zero.
    pub fn parse_lenient(minutes: &str, seconds: &str) -> Self {
        Self {
            minutes: parse_field(minutes),
            seconds: parse_field(seconds),
        }
    }

    pub fn total_ms(&self) -> u64 {
        self.minutes
            .saturating_mul(60)
            .saturating_add(self.seconds)
            .saturating_mul(1000)
    }

    pub fn is_zero(&self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }
}

fn parse_field(raw: &str) -> u64 {
    // Leading integer, like a lenient form field: "12abc" -> 12.
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

#[derive(Debug, Clone)]
pub struct CountdownTimer {
    engine: TimingEngine,
    initial_ms: u64,
    fired: bool,
    alert_ms: u64,
    frames: FrameLoop,
}

impl CountdownTimer {
    pub fn new(initial_ms: u64, alert_ms: u64) -> Self {
        Self {
            engine: TimingEngine::new(),
            initial_ms,
            fired: false,
            alert_ms,
            frames: FrameLoop::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn initial_ms(&self) -> u64 {
        self.initial_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.initial_ms.saturating_sub(self.engine.accumulated_ms())
    }

    pub fn fired(&self) -> bool {
        self.fired
    }

    pub fn readout(&self) -> String {
        format_millis(self.remaining_ms())
    }

    pub fn status(&self) -> &'static str {
        match self.phase() {
            Phase::Idle => "Idle",
            Phase::Running => "Running",
            Phase::Paused => "Paused",
            Phase::Completed => "Done",
        }
    }

    /// Handle of the scheduled frame callback, if running.
    pub fn frame_handle(&self) -> Option<FrameHandle> {
        self.frames.active()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume with the current duration.
    pub fn start(&mut self, now: u64) -> Option<Event> {
        if !self.engine.start(now) {
            return None;
        }
        self.frames.request();
        tracing::debug!(remaining_ms = self.remaining_ms(), "countdown started");
        Some(Event::CountdownStarted {
            remaining_ms: self.remaining_ms(),
            at: Utc::now(),
        })
    }

    /// Start using the entry fields. A non-zero entry replaces the duration
    /// only from Idle; a paused countdown resumes where it left off.
    pub fn start_with(&mut self, input: DurationInput, now: u64) -> Option<Event> {
        if self.phase() == Phase::Idle && !input.is_zero() {
            self.initial_ms = input.total_ms();
            self.engine.reset(0);
        }
        self.start(now)
    }

    /// Pause. If the final sample exhausts the duration this completes
    /// instead.
    pub fn pause(&mut self, now: u64) -> Option<Event> {
        if !self.engine.is_running() {
            return None;
        }
        if let Some(done) = self.tick(now) {
            return Some(done);
        }
        self.engine.stop(now);
        self.frames.cancel();
        tracing::debug!(remaining_ms = self.remaining_ms(), "countdown paused");
        Some(Event::CountdownPaused {
            remaining_ms: self.remaining_ms(),
            at: Utc::now(),
        })
    }

    /// Return to Idle with the entered duration and re-arm the alert.
    pub fn reset(&mut self, input: DurationInput) -> Option<Event> {
        self.frames.cancel();
        self.engine.reset(0);
        self.initial_ms = input.total_ms();
        self.fired = false;
        Some(Event::CountdownReset {
            remaining_ms: self.remaining_ms(),
            at: Utc::now(),
        })
    }

    /// Advance to `now`. Returns the completion event on the tick that
    /// reaches zero.
    pub fn tick(&mut self, now: u64) -> Option<Event> {
        if !self.engine.is_running() {
            return None;
        }
        self.engine.tick(now);
        if self.remaining_ms() > 0 || self.fired {
            return None;
        }
        self.engine.complete();
        self.frames.cancel();
        self.fired = true;
        tracing::info!("countdown completed");
        Some(Event::CountdownCompleted {
            alert: AlertSignal::new(self.alert_ms),
            at: Utc::now(),
        })
    }

    /// Frame callback entry point; stale handles are dropped.
    pub fn on_frame(&mut self, handle: FrameHandle, now: u64) -> Option<Event> {
        if !self.frames.accepts(handle) {
            tracing::warn!(handle = handle.id(), "dropping stale countdown frame");
            return None;
        }
        self.tick(now)
    }
}
