//! Latest-sample store for acceleration-including-gravity readings.
//!
//! No history, no filtering: each motion event replaces the whole vector.

use serde::{Deserialize, Serialize};

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Acceleration-including-gravity, in multiples of standard gravity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GravityVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl GravityVector {
    pub const ZERO: GravityVector = GravityVector {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Normalize a raw reading in m/s² by the given gravity constant.
    pub fn from_acceleration(raw: [f64; 3], gravity: f64) -> Self {
        let g = if gravity > 0.0 { gravity } else { STANDARD_GRAVITY };
        Self {
            x: raw[0] / g,
            y: raw[1] / g,
            z: raw[2] / g,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Holds the most recent gravity sample.
///
/// Starts at the zero vector until the first motion event arrives.
#[derive(Debug, Clone, Default)]
pub struct SensorSampleStore {
    latest: GravityVector,
    samples_seen: u64,
}

impl SensorSampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored vector. Non-finite samples are discarded so the
    /// classifier never sees a NaN component.
    pub fn record(&mut self, sample: GravityVector) -> bool {
        if !sample.is_finite() {
            tracing::debug!(?sample, "discarding non-finite gravity sample");
            return false;
        }
        self.latest = sample;
        self.samples_seen = self.samples_seen.saturating_add(1);
        true
    }

    pub fn latest(&self) -> GravityVector {
        self.latest
    }

    pub fn has_samples(&self) -> bool {
        self.samples_seen > 0
    }
}
