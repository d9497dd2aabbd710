//! Core error types for tiltboard-core.
//!
//! Failures in this crate are local: the dashboard keeps running on
//! fallback paths, so most of these surface only at input-parsing
//! boundaries (CLI arguments, config files, replay scripts) and host
//! seams (permission and weather providers).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tiltboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Motion permission request failed before yielding an outcome
    #[error("Motion permission request failed: {0}")]
    Permission(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure reported by a host-provided source (weather, location)
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Time of day outside 00:00..=23:59
    #[error("Invalid time of day {hour:02}:{minute:02}")]
    InvalidTimeOfDay { hour: u32, minute: u32 },

    /// Time of day text could not be parsed
    #[error("Cannot parse '{0}' as HH:MM")]
    UnparsableTimeOfDay(String),

    /// Orientation type string not one of the four modes
    #[error("Unknown orientation type '{0}'")]
    UnknownOrientation(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
