//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Orientation classifier thresholds
//! - Countdown defaults and alert lengths
//! - Alarm snooze and poll interval
//! - Frame callback period
//!
//! Configuration is stored at `~/.config/tiltboard/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::orientation::OrientationThresholds;
use crate::sensor::STANDARD_GRAVITY;
use crate::timer::DurationInput;

/// Returns `~/.config/tiltboard[-dev]/` based on TILTBOARD_ENV.
///
/// Set TILTBOARD_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TILTBOARD_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tiltboard-dev")
    } else {
        base_dir.join("tiltboard")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrientationConfig {
    #[serde(default = "default_portrait_flip")]
    pub portrait_flip_threshold: f64,
    #[serde(default = "default_landscape_split")]
    pub landscape_split_threshold: f64,
    #[serde(default = "default_gravity")]
    pub standard_gravity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default)]
    pub default_minutes: u64,
    #[serde(default = "default_countdown_seconds")]
    pub default_seconds: u64,
    #[serde(default = "default_countdown_alert")]
    pub alert_ms: u64,
    #[serde(default = "default_countdown_test_alert")]
    pub test_alert_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmConfig {
    #[serde(default = "default_snooze")]
    pub snooze_minutes: u32,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_alarm_alert")]
    pub alert_ms: u64,
    #[serde(default = "default_alarm_test_alert")]
    pub test_alert_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default = "default_true")]
    pub vibration: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameConfig {
    #[serde(default = "default_frame_interval")]
    pub interval_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/tiltboard/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub orientation: OrientationConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub alarm: AlarmConfig,
    #[serde(default)]
    pub alert: AlertConfig,
    #[serde(default)]
    pub frame: FrameConfig,
}

// Default functions
fn default_portrait_flip() -> f64 {
    OrientationThresholds::default().portrait_flip_threshold
}
fn default_landscape_split() -> f64 {
    OrientationThresholds::default().landscape_split_threshold
}
fn default_gravity() -> f64 {
    STANDARD_GRAVITY
}
fn default_countdown_seconds() -> u64 {
    30
}
fn default_countdown_alert() -> u64 {
    2000
}
fn default_countdown_test_alert() -> u64 {
    800
}
fn default_snooze() -> u32 {
    5
}
fn default_poll_interval() -> u64 {
    500
}
fn default_alarm_alert() -> u64 {
    2500
}
fn default_alarm_test_alert() -> u64 {
    1500
}
fn default_frame_interval() -> u64 {
    16
}
fn default_true() -> bool {
    true
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            portrait_flip_threshold: default_portrait_flip(),
            landscape_split_threshold: default_landscape_split(),
            standard_gravity: default_gravity(),
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            default_minutes: 0,
            default_seconds: default_countdown_seconds(),
            alert_ms: default_countdown_alert(),
            test_alert_ms: default_countdown_test_alert(),
        }
    }
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            snooze_minutes: default_snooze(),
            poll_interval_ms: default_poll_interval(),
            alert_ms: default_alarm_alert(),
            test_alert_ms: default_alarm_test_alert(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { vibration: true }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_frame_interval(),
        }
    }
}

impl OrientationConfig {
    pub fn thresholds(&self) -> OrientationThresholds {
        OrientationThresholds {
            portrait_flip_threshold: self.portrait_flip_threshold,
            landscape_split_threshold: self.landscape_split_threshold,
        }
    }
}

impl CountdownConfig {
    pub fn default_input(&self) -> DurationInput {
        DurationInput::new(self.default_minutes, self.default_seconds)
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(n) if n.is_f64() => {
                        let parsed = value.parse::<f64>().map_err(|e| invalid(e.to_string()))?;
                        serde_json::Number::from_f64(parsed)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot store '{value}' as number")))?
                    }
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|e| invalid(e.to_string()))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(cfg)
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value in memory by key, keeping the field's type.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// All leaf keys with their values, sorted by key.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Ok(serde_json::Value::Object(sections)) = serde_json::to_value(self) {
            for (section, fields) in sections {
                if let serde_json::Value::Object(fields) = fields {
                    for (name, value) in fields {
                        out.push((format!("{section}.{name}"), value.to_string()));
                    }
                }
            }
        }
        out
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
