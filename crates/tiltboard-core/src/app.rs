//! Top-level controller.
//!
//! All mutable dashboard state lives in one [`AppState`] owned by a
//! [`Dashboard`]. Every orientation source goes through [`Dashboard::ingest`]
//! as a [`SensorUpdate`], so simulated modes take the same path to the
//! dispatcher as real sensor data.
//!
//! The host drives three things: `ingest` on input events, `frame` on every
//! display frame, and `poll_alarm` on a slow fixed interval.

use serde::{Deserialize, Deserializer, Serialize};

use crate::alarm::AlarmScheduler;
use crate::alert::{AlertOutput, AlertSignal, AlertSink, SilentSink};
use crate::config::Config;
use crate::dispatch::ModeDispatcher;
use crate::error::ValidationError;
use crate::events::Event;
use crate::format::format_clock;
use crate::orientation::{Classifier, Mode, Viewport};
use crate::permission::{MotionPermissionProvider, PermissionGate};
use crate::sensor::{GravityVector, SensorSampleStore};
use crate::timer::{Clock, CountdownTimer, DurationInput, Stopwatch};
use crate::weather::{WeatherPanel, WeatherSource};

/// One input to the orientation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensorUpdate {
    /// Platform orientation type; `None` when the platform stops reporting.
    /// Unrecognised type strings count as absent.
    Native {
        #[serde(default, deserialize_with = "lenient_mode")]
        mode: Option<Mode>,
    },
    /// Legacy angle in degrees; `None` when unavailable.
    LegacyAngle { angle: Option<i32> },
    /// Raw acceleration including gravity, in m/s².
    Motion { x: f64, y: f64, z: f64 },
    /// Viewport resized.
    Viewport { width: u32, height: u32 },
    /// Re-run classification without new data.
    Reclassify,
    /// Manual override, bypassing the classifier.
    Simulated { mode: Mode },
}

fn lenient_mode<'de, D>(deserializer: D) -> Result<Option<Mode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.parse::<Mode>() {
        Ok(mode) => Some(mode),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring native orientation");
            None
        }
    }))
}

/// Everything the dashboard mutates.
#[derive(Debug, Clone)]
pub struct AppState {
    pub sensors: SensorSampleStore,
    pub native: Option<Mode>,
    pub legacy_angle: Option<i32>,
    pub viewport: Viewport,
    pub dispatcher: ModeDispatcher,
    pub countdown: CountdownTimer,
    pub stopwatch: Stopwatch,
    pub alarm: AlarmScheduler,
    pub weather: WeatherPanel,
    pub permission: PermissionGate,
    pub page_visible: bool,
}

pub struct Dashboard<C: Clock> {
    state: AppState,
    classifier: Classifier,
    config: Config,
    alerts: AlertOutput,
    clock: C,
}

impl<C: Clock> Dashboard<C> {
    pub fn new(
        config: Config,
        clock: C,
        sink: Box<dyn AlertSink>,
        requires_permission_prompt: bool,
    ) -> Self {
        let state = AppState {
            sensors: SensorSampleStore::new(),
            native: None,
            legacy_angle: None,
            viewport: Viewport::default(),
            dispatcher: ModeDispatcher::new(),
            countdown: CountdownTimer::new(
                config.countdown.default_input().total_ms(),
                config.countdown.alert_ms,
            ),
            stopwatch: Stopwatch::new(),
            alarm: AlarmScheduler::new(config.alarm.snooze_minutes, config.alarm.alert_ms),
            weather: WeatherPanel::new(),
            permission: PermissionGate::new(requires_permission_prompt),
            page_visible: true,
        };
        Self {
            state,
            classifier: Classifier::new(config.orientation.thresholds()),
            alerts: AlertOutput::new(sink, config.alert.vibration),
            config,
            clock,
        }
    }

    /// Default config, silent alerts, no permission prompt.
    pub fn with_clock(clock: C) -> Self {
        Self::new(Config::default(), clock, Box::new(SilentSink), false)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn alerts(&self) -> &AlertOutput {
        &self.alerts
    }

    pub fn mode(&self) -> Option<Mode> {
        self.state.dispatcher.last_applied()
    }

    pub fn label(&self) -> &'static str {
        self.state.dispatcher.label()
    }

    /// Live `HH:MM:SS` for the alarm panel.
    pub fn clock_readout(&self) -> String {
        format_clock(self.clock.local_now().time())
    }

    // ── Orientation ──────────────────────────────────────────────────

    /// Single entry point for every orientation source.
    pub fn ingest(&mut self, update: SensorUpdate) -> Option<Event> {
        match update {
            SensorUpdate::Simulated { mode } => {
                return self.state.dispatcher.apply(mode);
            }
            SensorUpdate::Native { mode } => self.state.native = mode,
            SensorUpdate::LegacyAngle { angle } => self.state.legacy_angle = angle,
            SensorUpdate::Motion { x, y, z } => {
                let sample = GravityVector::from_acceleration(
                    [x, y, z],
                    self.config.orientation.standard_gravity,
                );
                self.state.sensors.record(sample);
            }
            SensorUpdate::Viewport { width, height } => {
                self.state.viewport = Viewport::new(width, height);
            }
            SensorUpdate::Reclassify => {}
        }
        let mode = self.classify();
        self.state.dispatcher.apply(mode)
    }

    /// Classify the current inputs without applying.
    pub fn classify(&self) -> Mode {
        self.classifier.classify(
            self.state.native,
            self.state.legacy_angle,
            self.state.sensors.latest(),
            self.state.viewport.is_portrait(),
        )
    }

    // ── Countdown ────────────────────────────────────────────────────

    pub fn countdown_start(&mut self, input: DurationInput) -> Option<Event> {
        let now = self.clock.monotonic_ms();
        self.state.countdown.start_with(input, now)
    }

    pub fn countdown_pause(&mut self) -> Option<Event> {
        let now = self.clock.monotonic_ms();
        let event = self.state.countdown.pause(now);
        self.raise(event)
    }

    pub fn countdown_reset(&mut self, input: DurationInput) -> Option<Event> {
        self.state.countdown.reset(input)
    }

    pub fn countdown_test_alert(&mut self) -> Option<Event> {
        self.test_alert(self.config.countdown.test_alert_ms)
    }

    // ── Stopwatch ────────────────────────────────────────────────────

    pub fn stopwatch_start(&mut self) -> Option<Event> {
        let now = self.clock.monotonic_ms();
        self.state.stopwatch.start(now)
    }

    pub fn stopwatch_stop(&mut self) -> Option<Event> {
        let now = self.clock.monotonic_ms();
        self.state.stopwatch.stop(now)
    }

    pub fn stopwatch_reset(&mut self) -> Option<Event> {
        self.state.stopwatch.reset()
    }

    pub fn stopwatch_lap(&mut self) -> Option<Event> {
        let now = self.clock.monotonic_ms();
        self.state.stopwatch.lap(now)
    }

    // ── Alarm ────────────────────────────────────────────────────────

    pub fn alarm_set(&mut self, input: &str) -> Result<Option<Event>, ValidationError> {
        let now = self.clock.local_now();
        self.state.alarm.set_from_input(input, now)
    }

    pub fn alarm_clear(&mut self) -> Option<Event> {
        self.state.alarm.clear()
    }

    pub fn alarm_snooze(&mut self) -> Option<Event> {
        let now = self.clock.local_now();
        self.state.alarm.snooze(now)
    }

    pub fn alarm_test_alert(&mut self) -> Option<Event> {
        self.test_alert(self.config.alarm.test_alert_ms)
    }

    // ── Scheduling ───────────────────────────────────────────────────

    /// Per-frame callback: advance every running timing widget.
    pub fn frame(&mut self) -> Vec<Event> {
        let now = self.clock.monotonic_ms();
        let mut events = Vec::new();
        if let Some(handle) = self.state.countdown.frame_handle() {
            if let Some(event) = self.state.countdown.on_frame(handle, now) {
                events.extend(self.raise(Some(event)));
            }
        }
        if let Some(handle) = self.state.stopwatch.frame_handle() {
            self.state.stopwatch.on_frame(handle, now);
        }
        events
    }

    /// Slow poll for the alarm.
    pub fn poll_alarm(&mut self) -> Option<Event> {
        let now = self.clock.local_now();
        let event = self.state.alarm.poll(now);
        self.raise(event)
    }

    /// True while any widget wants frame callbacks.
    pub fn needs_frames(&self) -> bool {
        self.state.countdown.frame_handle().is_some()
            || self.state.stopwatch.frame_handle().is_some()
    }

    // ── Platform lifecycle ───────────────────────────────────────────

    /// Page visibility changed; suspends or resumes the alert output.
    pub fn set_page_visible(&mut self, visible: bool) -> Option<Event> {
        self.state.page_visible = visible;
        let at = chrono::Utc::now();
        if visible {
            let flushed = self.alerts.deferred_len();
            self.alerts
                .resume()
                .then_some(Event::AlertOutputResumed { flushed, at })
        } else {
            self.alerts
                .suspend()
                .then_some(Event::AlertOutputSuspended { at })
        }
    }

    pub async fn request_permission<P: MotionPermissionProvider>(
        &mut self,
        provider: &P,
    ) -> Option<Event> {
        self.state.permission.request(provider).await
    }

    pub async fn refresh_weather<S: WeatherSource>(&mut self, source: &S) {
        self.state.weather.refresh(source).await;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn test_alert(&mut self, duration_ms: u64) -> Option<Event> {
        self.raise(Some(Event::AlertTested {
            alert: AlertSignal::new(duration_ms),
            at: chrono::Utc::now(),
        }))
    }

    /// Route any alert the event carries to the shared output.
    fn raise(&mut self, event: Option<Event>) -> Option<Event> {
        if let Some(signal) = event.as_ref().and_then(Event::alert) {
            self.alerts.raise(signal);
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualClock;
    use chrono::NaiveDate;

    fn dashboard() -> Dashboard<ManualClock> {
        let wall = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        Dashboard::with_clock(ManualClock::new(wall))
    }

    #[test]
    fn motion_samples_are_normalized_before_classification() {
        let mut dash = dashboard();
        dash.ingest(SensorUpdate::Viewport {
            width: 400,
            height: 800,
        });
        dash.ingest(SensorUpdate::Motion {
            x: 0.0,
            y: 5.886,
            z: 0.0,
        });
        assert_eq!(dash.mode(), Some(Mode::PortraitSecondary));
        assert!((dash.state().sensors.latest().y - 0.6).abs() < 1e-9);
    }

    #[test]
    fn native_signal_outranks_later_motion() {
        let mut dash = dashboard();
        dash.ingest(SensorUpdate::Native {
            mode: Some(Mode::LandscapeSecondary),
        });
        assert!(dash
            .ingest(SensorUpdate::Motion {
                x: -9.81,
                y: 0.0,
                z: 0.0
            })
            .is_none());
        assert_eq!(dash.mode(), Some(Mode::LandscapeSecondary));
    }

    #[test]
    fn unknown_native_type_falls_through_to_legacy_angle() {
        let mut dash = dashboard();
        dash.ingest(SensorUpdate::LegacyAngle { angle: Some(90) });
        let update: SensorUpdate =
            serde_json::from_str(r#"{"kind":"native","mode":"upside-down"}"#).unwrap();
        assert_eq!(update, SensorUpdate::Native { mode: None });
        dash.ingest(update);
        assert_eq!(dash.mode(), Some(Mode::LandscapePrimary));

        let missing: SensorUpdate = serde_json::from_str(r#"{"kind":"native"}"#).unwrap();
        assert_eq!(missing, SensorUpdate::Native { mode: None });
    }

    #[test]
    fn update_json_is_tagged() {
        let update: SensorUpdate =
            serde_json::from_str(r#"{"kind":"simulated","mode":"portrait-secondary"}"#).unwrap();
        assert_eq!(
            update,
            SensorUpdate::Simulated {
                mode: Mode::PortraitSecondary
            }
        );
    }
}
