use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Label shown before any mode has been applied.
pub const DETECTING_LABEL: &str = "Detecting…";

/// One of the four discrete device orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    PortraitPrimary,
    PortraitSecondary,
    LandscapePrimary,
    LandscapeSecondary,
}

/// The dashboard panel dedicated to each mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Alarm,
    Timer,
    Stopwatch,
    Weather,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::PortraitPrimary,
        Mode::PortraitSecondary,
        Mode::LandscapePrimary,
        Mode::LandscapeSecondary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::PortraitPrimary => "portrait-primary",
            Mode::PortraitSecondary => "portrait-secondary",
            Mode::LandscapePrimary => "landscape-primary",
            Mode::LandscapeSecondary => "landscape-secondary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::PortraitPrimary => "Portrait ↑ — Alarm Clock",
            Mode::PortraitSecondary => "Portrait ↓ — Timer",
            Mode::LandscapePrimary => "Landscape ⟲ — Stopwatch",
            Mode::LandscapeSecondary => "Landscape ⟳ — Weather",
        }
    }

    pub fn panel(&self) -> Panel {
        match self {
            Mode::PortraitPrimary => Panel::Alarm,
            Mode::PortraitSecondary => Panel::Timer,
            Mode::LandscapePrimary => Panel::Stopwatch,
            Mode::LandscapeSecondary => Panel::Weather,
        }
    }

    pub fn is_portrait(&self) -> bool {
        matches!(self, Mode::PortraitPrimary | Mode::PortraitSecondary)
    }
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::Alarm, Panel::Timer, Panel::Stopwatch, Panel::Weather];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| ValidationError::UnknownOrientation(s.to_string()))
    }
}
