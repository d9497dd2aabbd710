//! Orientation classification.
//!
//! Resolution order, first available wins:
//!
//! 1. native orientation type from the platform, passed through;
//! 2. legacy angle (0, 180, 90, -90), any other value treated as absent;
//! 3. viewport aspect for portrait vs landscape, then the gravity vector
//!    to tell primary from secondary.
//!
//! Before any motion sample arrives the gravity vector is zero, so rule 3
//! reports a primary orientation rather than anything ambiguous.

use serde::{Deserialize, Serialize};

use super::mode::Mode;
use crate::sensor::GravityVector;

/// Empirical disambiguation thresholds, in units of standard gravity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationThresholds {
    /// Portrait is upside-down when gravity y exceeds this.
    #[serde(default = "default_portrait_flip")]
    pub portrait_flip_threshold: f64,
    /// Landscape is secondary when gravity x exceeds this.
    #[serde(default)]
    pub landscape_split_threshold: f64,
}

fn default_portrait_flip() -> f64 {
    0.5
}

impl Default for OrientationThresholds {
    fn default() -> Self {
        Self {
            portrait_flip_threshold: default_portrait_flip(),
            landscape_split_threshold: 0.0,
        }
    }
}

/// Viewport dimensions in CSS-like pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square counts as portrait.
    pub fn is_portrait(&self) -> bool {
        self.height >= self.width
    }
}

/// Map a legacy `window.orientation`-style angle.
pub fn legacy_angle_mode(angle: i32) -> Option<Mode> {
    match angle {
        0 => Some(Mode::PortraitPrimary),
        180 => Some(Mode::PortraitSecondary),
        90 => Some(Mode::LandscapePrimary),
        -90 => Some(Mode::LandscapeSecondary),
        _ => None,
    }
}

/// Classifier carrying its thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    thresholds: OrientationThresholds,
}

impl Classifier {
    pub fn new(thresholds: OrientationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &OrientationThresholds {
        &self.thresholds
    }

    pub fn classify(
        &self,
        native: Option<Mode>,
        legacy_angle: Option<i32>,
        gravity: GravityVector,
        viewport_is_portrait: bool,
    ) -> Mode {
        if let Some(mode) = native {
            return mode;
        }
        if let Some(mode) = legacy_angle.and_then(legacy_angle_mode) {
            return mode;
        }
        self.from_gravity(gravity, viewport_is_portrait)
    }

    fn from_gravity(&self, gravity: GravityVector, viewport_is_portrait: bool) -> Mode {
        if viewport_is_portrait {
            // Positive y: top of the device points down.
            if gravity.y > self.thresholds.portrait_flip_threshold {
                Mode::PortraitSecondary
            } else {
                Mode::PortraitPrimary
            }
        } else if gravity.x > self.thresholds.landscape_split_threshold {
            Mode::LandscapeSecondary
        } else {
            Mode::LandscapePrimary
        }
    }
}

/// Classify with the default thresholds.
pub fn classify(
    native: Option<Mode>,
    legacy_angle: Option<i32>,
    gravity: GravityVector,
    viewport_is_portrait: bool,
) -> Mode {
    Classifier::default().classify(native, legacy_angle, gravity, viewport_is_portrait)
}
