//! Readout formatting for the panels.

use chrono::{NaiveTime, Timelike};

/// Format milliseconds as `MM:SS.mmm`. Minutes are not wrapped into hours.
pub fn format_millis(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}

/// Format a wall-clock time as `HH:MM:SS`.
pub fn format_clock(time: NaiveTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}
