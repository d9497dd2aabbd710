//! Single alarm against an absolute local time.
//!
//! Unlike the timers this compares the wall clock against a target instead
//! of accumulating: an alarm set for 07:00 should ring at 07:00 local even
//! if the clock was adjusted in between.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike, Utc};

use crate::alert::AlertSignal;
use crate::error::ValidationError;
use crate::events::Event;
use crate::format::format_clock;

pub const STATUS_NONE: &str = "No alarm set";
pub const STATUS_PICK: &str = "Pick a time";
pub const STATUS_FIRED: &str = "Alarm!";

/// Parse `HH:MM` (as produced by a time input) into a time of day.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, ValidationError> {
    let unparsable = || ValidationError::UnparsableTimeOfDay(input.to_string());
    let (h, m) = input.trim().split_once(':').ok_or_else(unparsable)?;
    let hour: u32 = h.trim().parse().map_err(|_| unparsable())?;
    let minute: u32 = m.trim().parse().map_err(|_| unparsable())?;
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or(ValidationError::InvalidTimeOfDay { hour, minute })
}

#[derive(Debug, Clone)]
pub struct AlarmScheduler {
    target: Option<NaiveDateTime>,
    status: String,
    /// Set when the alarm rings so it can still be snoozed afterwards.
    just_fired: bool,
    snooze_minutes: u32,
    alert_ms: u64,
}

impl AlarmScheduler {
    pub fn new(snooze_minutes: u32, alert_ms: u64) -> Self {
        Self {
            target: None,
            status: STATUS_NONE.to_string(),
            just_fired: false,
            snooze_minutes,
            alert_ms,
        }
    }

    pub fn target(&self) -> Option<NaiveDateTime> {
        self.target
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Arm for the next occurrence of `hour:minute`: today if still ahead
    /// of `now`, otherwise tomorrow.
    pub fn set_target(
        &mut self,
        hour: u32,
        minute: u32,
        now: NaiveDateTime,
    ) -> Result<Event, ValidationError> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or(ValidationError::InvalidTimeOfDay { hour, minute })?;
        let mut target = now.date().and_time(time);
        if target <= now {
            target += Duration::days(1);
        }
        self.target = Some(target);
        self.just_fired = false;
        self.status = format!("Set for {}", format_clock(target.time()));
        tracing::debug!(%target, "alarm armed");
        Ok(Event::AlarmSet {
            target,
            status: self.status.clone(),
            at: Utc::now(),
        })
    }

    /// Arm from raw `HH:MM` text. Blank input asks the user to pick a time
    /// and leaves any existing alarm alone.
    pub fn set_from_input(
        &mut self,
        input: &str,
        now: NaiveDateTime,
    ) -> Result<Option<Event>, ValidationError> {
        if input.trim().is_empty() {
            self.status = STATUS_PICK.to_string();
            return Ok(None);
        }
        let time = parse_time_of_day(input)?;
        self.set_target(time.hour(), time.minute(), now).map(Some)
    }

    pub fn clear(&mut self) -> Option<Event> {
        self.target = None;
        self.just_fired = false;
        self.status = STATUS_NONE.to_string();
        Some(Event::AlarmCleared {
            status: self.status.clone(),
            at: Utc::now(),
        })
    }

    /// Push the alarm to `now + snooze`. No-op when nothing is armed and
    /// nothing has just rung.
    pub fn snooze(&mut self, now: NaiveDateTime) -> Option<Event> {
        if self.target.is_none() && !self.just_fired {
            return None;
        }
        let target = now + Duration::minutes(i64::from(self.snooze_minutes));
        self.target = Some(target);
        self.just_fired = false;
        self.status = format!("Snoozed for {} minutes", self.snooze_minutes);
        tracing::debug!(%target, "alarm snoozed");
        Some(Event::AlarmSnoozed {
            target,
            status: self.status.clone(),
            at: Utc::now(),
        })
    }

    /// Periodic check. Fires at most once per armed target.
    pub fn poll(&mut self, now: NaiveDateTime) -> Option<Event> {
        let target = self.target?;
        if now < target {
            return None;
        }
        self.target = None;
        self.just_fired = true;
        self.status = STATUS_FIRED.to_string();
        tracing::info!(%target, "alarm fired");
        Some(Event::AlarmFired {
            alert: AlertSignal::new(self.alert_ms),
            status: self.status.clone(),
            at: Utc::now(),
        })
    }
}
