//! Audible/haptic alert contract and the shared output device lifecycle.
//!
//! Alarm and countdown completion raise the same [`AlertSignal`]; only the
//! duration differs. The output is suspended while the page is hidden and
//! alerts raised meanwhile are deferred until it resumes.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Five-pulse vibration pattern in milliseconds (on, off, on, off, on).
pub const VIBRATION_PATTERN_MS: [u64; 5] = [100, 50, 100, 50, 200];

const START_HZ: f64 = 880.0;
const END_HZ: f64 = 440.0;
const ATTACK_MS: f64 = 50.0;
const PEAK_GAIN: f64 = 0.3;
const FLOOR_GAIN: f64 = 0.0001;
/// Oscillator keeps running this long after the envelope reaches the floor.
const TAIL_MS: u64 = 50;

/// An alert request, parameterized by its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSignal {
    pub duration_ms: u64,
}

impl AlertSignal {
    pub fn new(duration_ms: u64) -> Self {
        Self { duration_ms }
    }

    pub fn tone(&self) -> TonePlan {
        TonePlan {
            start_hz: START_HZ,
            end_hz: END_HZ,
            sweep_ms: self.duration_ms / 2,
            attack_ms: ATTACK_MS,
            peak_gain: PEAK_GAIN,
            floor_gain: FLOOR_GAIN,
            envelope_ms: self.duration_ms,
            stop_ms: self.duration_ms + TAIL_MS,
        }
    }

    pub fn vibration_pattern(&self) -> &'static [u64] {
        &VIBRATION_PATTERN_MS
    }
}

/// Sine sweep with an exponential attack/decay envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TonePlan {
    pub start_hz: f64,
    pub end_hz: f64,
    pub sweep_ms: u64,
    pub attack_ms: f64,
    pub peak_gain: f64,
    pub floor_gain: f64,
    pub envelope_ms: u64,
    pub stop_ms: u64,
}

impl TonePlan {
    /// Exponential ramp from `start_hz` to `end_hz`, then held.
    pub fn frequency_at(&self, t_ms: f64) -> f64 {
        if self.sweep_ms == 0 || t_ms >= self.sweep_ms as f64 {
            return self.end_hz;
        }
        let progress = (t_ms.max(0.0)) / self.sweep_ms as f64;
        self.start_hz * (self.end_hz / self.start_hz).powf(progress)
    }

    /// Fast exponential attack to `peak_gain`, slow exponential decay back
    /// to `floor_gain` at `envelope_ms`.
    pub fn gain_at(&self, t_ms: f64) -> f64 {
        let t = t_ms.max(0.0);
        let envelope = self.envelope_ms as f64;
        if t >= envelope {
            return self.floor_gain;
        }
        let attack = self.attack_ms.min(envelope);
        if t < attack {
            let progress = t / attack;
            return self.floor_gain * (self.peak_gain / self.floor_gain).powf(progress);
        }
        let decay_len = envelope - attack;
        if decay_len <= 0.0 {
            return self.floor_gain;
        }
        let progress = (t - attack) / decay_len;
        self.peak_gain * (self.floor_gain / self.peak_gain).powf(progress)
    }
}

/// The device that actually renders an alert.
pub trait AlertSink {
    fn play(&mut self, signal: &AlertSignal, vibrate: bool);
}

/// Sink that only logs; used when no audio device is attached.
#[derive(Debug, Default)]
pub struct SilentSink;

impl AlertSink for SilentSink {
    fn play(&mut self, signal: &AlertSignal, vibrate: bool) {
        tracing::info!(duration_ms = signal.duration_ms, vibrate, "alert (silent sink)");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputState {
    Running,
    Suspended,
}

/// Single shared alert output with suspend/resume tied to page visibility.
pub struct AlertOutput {
    sink: Box<dyn AlertSink>,
    state: OutputState,
    vibration: bool,
    deferred: VecDeque<AlertSignal>,
}

impl AlertOutput {
    pub fn new(sink: Box<dyn AlertSink>, vibration: bool) -> Self {
        Self {
            sink,
            state: OutputState::Running,
            vibration,
            deferred: VecDeque::new(),
        }
    }

    pub fn state(&self) -> OutputState {
        self.state
    }

    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    /// Play now, or defer while suspended. Returns true if played.
    pub fn raise(&mut self, signal: AlertSignal) -> bool {
        match self.state {
            OutputState::Running => {
                tracing::info!(duration_ms = signal.duration_ms, "alert raised");
                self.sink.play(&signal, self.vibration);
                true
            }
            OutputState::Suspended => {
                tracing::debug!(duration_ms = signal.duration_ms, "alert deferred while suspended");
                self.deferred.push_back(signal);
                false
            }
        }
    }

    /// Returns false if already suspended.
    pub fn suspend(&mut self) -> bool {
        if self.state == OutputState::Suspended {
            return false;
        }
        self.state = OutputState::Suspended;
        true
    }

    /// Resume and flush deferred alerts in order. Returns false if already running.
    pub fn resume(&mut self) -> bool {
        if self.state == OutputState::Running {
            return false;
        }
        self.state = OutputState::Running;
        while let Some(signal) = self.deferred.pop_front() {
            self.sink.play(&signal, self.vibration);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<u64>>>);

    impl AlertSink for Recorder {
        fn play(&mut self, signal: &AlertSignal, _vibrate: bool) {
            self.0.borrow_mut().push(signal.duration_ms);
        }
    }

    #[test]
    fn tone_sweeps_over_half_the_duration() {
        let tone = AlertSignal::new(2000).tone();
        assert_eq!(tone.sweep_ms, 1000);
        assert_eq!(tone.frequency_at(0.0), 880.0);
        assert!((tone.frequency_at(500.0) - 622.25).abs() < 0.1);
        assert_eq!(tone.frequency_at(1000.0), 440.0);
        assert_eq!(tone.frequency_at(1800.0), 440.0);
        assert_eq!(tone.stop_ms, 2050);
    }

    #[test]
    fn envelope_attacks_fast_and_decays_slowly() {
        let tone = AlertSignal::new(2500).tone();
        assert!((tone.gain_at(0.0) - 0.0001).abs() < 1e-9);
        assert!((tone.gain_at(50.0) - 0.3).abs() < 1e-9);
        assert!(tone.gain_at(1000.0) < 0.3);
        assert!(tone.gain_at(1000.0) > tone.gain_at(2000.0));
        assert_eq!(tone.gain_at(2500.0), 0.0001);
    }

    #[test]
    fn vibration_pattern_is_fixed() {
        assert_eq!(AlertSignal::new(800).vibration_pattern(), &[100, 50, 100, 50, 200]);
    }

    #[test]
    fn suspended_output_defers_until_resume() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let mut output = AlertOutput::new(Box::new(Recorder(played.clone())), true);

        assert!(output.suspend());
        assert!(!output.suspend());
        assert!(!output.raise(AlertSignal::new(2500)));
        assert!(!output.raise(AlertSignal::new(2000)));
        assert!(played.borrow().is_empty());
        assert_eq!(output.deferred_len(), 2);

        assert!(output.resume());
        assert_eq!(*played.borrow(), vec![2500, 2000]);
        assert_eq!(output.deferred_len(), 0);
        assert!(!output.resume());
    }
}
