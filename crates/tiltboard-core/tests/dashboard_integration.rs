//! Integration tests for the dashboard controller.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tiltboard_core::{
    AlertSignal, AlertSink, Clock, Config, Dashboard, DurationInput, Event, ManualClock, Mode, Panel,
    Phase, SensorUpdate,
};

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<(u64, bool)>>>);

impl AlertSink for Recorder {
    fn play(&mut self, signal: &AlertSignal, vibrate: bool) {
        self.0.borrow_mut().push((signal.duration_ms, vibrate));
    }
}

fn morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(7, 30, 0)
        .unwrap()
}

fn dashboard() -> (Dashboard<ManualClock>, Recorder) {
    let recorder = Recorder::default();
    let dash = Dashboard::new(
        Config::default(),
        ManualClock::new(morning()),
        Box::new(recorder.clone()),
        false,
    );
    (dash, recorder)
}

fn mode_changes(events: &[Option<Event>]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Some(Event::ModeChanged { .. })))
        .count()
}

#[test]
fn reports_primary_before_any_sensor_data() {
    let (mut dash, _) = dashboard();
    assert_eq!(dash.label(), "Detecting…");
    dash.ingest(SensorUpdate::Viewport {
        width: 390,
        height: 844,
    });
    assert_eq!(dash.mode(), Some(Mode::PortraitPrimary));
    dash.ingest(SensorUpdate::Viewport {
        width: 844,
        height: 390,
    });
    assert_eq!(dash.mode(), Some(Mode::LandscapePrimary));
}

#[test]
fn simulated_and_sensor_modes_share_one_dispatch_path() {
    let (mut dash, _) = dashboard();
    let events = vec![
        dash.ingest(SensorUpdate::Simulated {
            mode: Mode::PortraitSecondary,
        }),
        // Real data agreeing with the simulation is redundant.
        dash.ingest(SensorUpdate::LegacyAngle { angle: Some(180) }),
        dash.ingest(SensorUpdate::LegacyAngle { angle: Some(180) }),
    ];
    assert_eq!(mode_changes(&events), 1);
    assert_eq!(dash.state().dispatcher.visible_panel(), Some(Panel::Timer));
}

#[test]
fn noisy_gravity_stream_changes_mode_only_on_crossing() {
    let (mut dash, _) = dashboard();
    dash.ingest(SensorUpdate::Viewport {
        width: 400,
        height: 800,
    });
    let ys = [0.5, 1.0, 2.0, 3.0, 6.0, 7.0, 6.5, 2.0, 1.0];
    let events: Vec<Option<Event>> = ys
        .iter()
        .map(|y| SensorUpdate::Motion {
            x: 0.0,
            y: *y,
            z: 9.0,
        })
        .map(|u| dash.ingest(u))
        .collect();
    // Primary (from viewport) -> secondary at 6.0 -> primary at 2.0.
    assert_eq!(mode_changes(&events), 2);
    assert_eq!(dash.mode(), Some(Mode::PortraitPrimary));
    assert_eq!(dash.state().dispatcher.transitions(), 3);
}

#[test]
fn losing_native_signal_falls_back_to_legacy_angle() {
    let (mut dash, _) = dashboard();
    dash.ingest(SensorUpdate::LegacyAngle { angle: Some(-90) });
    dash.ingest(SensorUpdate::Native {
        mode: Some(Mode::PortraitPrimary),
    });
    assert_eq!(dash.mode(), Some(Mode::PortraitPrimary));
    dash.ingest(SensorUpdate::Native { mode: None });
    assert_eq!(dash.mode(), Some(Mode::LandscapeSecondary));
}

#[test]
fn countdown_fires_once_through_frames() {
    let (mut dash, recorder) = dashboard();
    dash.countdown_start(DurationInput::new(0, 5));
    let mut completions = 0;
    for _ in 0..400 {
        dash.clock().advance(16);
        completions += dash
            .frame()
            .iter()
            .filter(|e| matches!(e, Event::CountdownCompleted { .. }))
            .count();
    }
    assert_eq!(completions, 1);
    assert_eq!(dash.state().countdown.phase(), Phase::Completed);
    assert_eq!(*recorder.0.borrow(), vec![(2000, true)]);
    assert!(!dash.needs_frames());
}

#[test]
fn countdown_pause_excludes_real_time_gap() {
    let (mut dash, _) = dashboard();
    dash.countdown_start(DurationInput::new(1, 0));
    dash.clock().advance(10_000);
    dash.frame();
    dash.countdown_pause();
    dash.clock().advance(3_600_000);
    dash.frame();
    assert_eq!(dash.state().countdown.remaining_ms(), 50_000);
    dash.countdown_start(DurationInput::default());
    dash.clock().advance(1_000);
    dash.frame();
    assert_eq!(dash.state().countdown.readout(), "00:49.000");
}

#[test]
fn wall_clock_jump_does_not_touch_stopwatch() {
    let (mut dash, _) = dashboard();
    dash.stopwatch_start();
    dash.clock().advance(1_000);
    dash.frame();
    dash.clock().set_wall(morning() - Duration::hours(5));
    dash.clock().advance(234);
    dash.frame();
    dash.stopwatch_lap();
    let laps = dash.state().stopwatch.laps();
    assert_eq!(laps[0].readout(), "00:01.234");

    dash.stopwatch_reset();
    assert!(dash.state().stopwatch.laps().is_empty());
    assert_eq!(dash.state().stopwatch.readout(), "00:00.000");
}

#[test]
fn alarm_fires_once_and_can_be_snoozed() {
    let (mut dash, recorder) = dashboard();
    dash.alarm_set("07:31").unwrap();
    let mut fired = 0;
    for _ in 0..240 {
        dash.clock().advance(500);
        if dash.poll_alarm().is_some() {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
    assert_eq!(dash.state().alarm.status(), "Alarm!");
    assert_eq!(*recorder.0.borrow(), vec![(2500, true)]);

    let now = dash.clock().local_now();
    dash.alarm_snooze();
    assert_eq!(
        dash.state().alarm.target(),
        Some(now + Duration::milliseconds(300_000))
    );
}

#[test]
fn alarm_set_earlier_than_now_rolls_over() {
    let (mut dash, _) = dashboard();
    dash.alarm_set("07:00").unwrap();
    let naive_same_day = morning().date().and_hms_opt(7, 0, 0).unwrap();
    assert_eq!(
        dash.state().alarm.target(),
        Some(naive_same_day + Duration::hours(24))
    );
}

#[test]
fn hidden_page_defers_alerts_until_visible() {
    let (mut dash, recorder) = dashboard();
    assert!(matches!(
        dash.set_page_visible(false),
        Some(Event::AlertOutputSuspended { .. })
    ));
    dash.alarm_test_alert();
    dash.countdown_test_alert();
    assert!(recorder.0.borrow().is_empty());
    assert!(matches!(
        dash.set_page_visible(true),
        Some(Event::AlertOutputResumed { flushed: 2, .. })
    ));
    assert_eq!(*recorder.0.borrow(), vec![(1500, true), (800, true)]);
    assert!(dash.set_page_visible(true).is_none());
}
