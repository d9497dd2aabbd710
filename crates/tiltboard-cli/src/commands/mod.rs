pub mod alarm;
pub mod classify;
pub mod config;
pub mod countdown;
pub mod replay;
pub mod stopwatch;

use std::io::Write;

use tiltboard_core::{AlertSignal, AlertSink, Config, Dashboard, Event, SystemClock};

/// Rings the terminal bell for each alert.
pub struct TerminalBell;

impl AlertSink for TerminalBell {
    fn play(&mut self, signal: &AlertSignal, vibrate: bool) {
        let tone = signal.tone();
        tracing::info!(
            duration_ms = signal.duration_ms,
            sweep_ms = tone.sweep_ms,
            vibrate,
            "ringing terminal bell"
        );
        eprint!("\x07");
        if let Err(e) = std::io::stderr().flush() {
            tracing::debug!(error = %e, "stderr flush failed");
        }
    }
}

pub fn dashboard() -> Dashboard<SystemClock> {
    Dashboard::new(
        Config::load_or_default(),
        SystemClock::new(),
        Box::new(TerminalBell),
        false,
    )
}

pub fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
