use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::AlertSignal;
use crate::orientation::{Mode, Panel};
use crate::permission::MotionPermission;

/// Every observable state change in the dashboard produces an Event.
/// The view layer renders from these; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The visible panel switched. Emitted once per distinct mode.
    ModeChanged {
        mode: Mode,
        label: String,
        visible_panel: Panel,
        at: DateTime<Utc>,
    },
    CountdownStarted {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    CountdownPaused {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    CountdownReset {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// Fires exactly once per run; cleared only by reset.
    CountdownCompleted {
        alert: AlertSignal,
        at: DateTime<Utc>,
    },
    StopwatchStarted {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchStopped {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchReset {
        at: DateTime<Utc>,
    },
    LapRecorded {
        number: usize,
        elapsed_ms: u64,
        readout: String,
        at: DateTime<Utc>,
    },
    AlarmSet {
        target: chrono::NaiveDateTime,
        status: String,
        at: DateTime<Utc>,
    },
    AlarmCleared {
        status: String,
        at: DateTime<Utc>,
    },
    AlarmSnoozed {
        target: chrono::NaiveDateTime,
        status: String,
        at: DateTime<Utc>,
    },
    AlarmFired {
        alert: AlertSignal,
        status: String,
        at: DateTime<Utc>,
    },
    /// A test button raised an alert without any timer state change.
    AlertTested {
        alert: AlertSignal,
        at: DateTime<Utc>,
    },
    PermissionChanged {
        permission: MotionPermission,
        needs_prompt: bool,
        at: DateTime<Utc>,
    },
    AlertOutputSuspended {
        at: DateTime<Utc>,
    },
    AlertOutputResumed {
        flushed: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// The alert carried by this event, if it should make noise.
    pub fn alert(&self) -> Option<AlertSignal> {
        match self {
            Event::CountdownCompleted { alert, .. }
            | Event::AlarmFired { alert, .. }
            | Event::AlertTested { alert, .. } => Some(*alert),
            _ => None,
        }
    }
}
