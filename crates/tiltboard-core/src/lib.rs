//! # Tiltboard Core Library
//!
//! Core logic for an orientation-reactive dashboard that shows one of four
//! panels (alarm, timer, stopwatch, weather) depending on how the device is
//! held. Rendering, audio synthesis and platform sensors live in the host;
//! this crate decides what to show and keeps time.
//!
//! ## Architecture
//!
//! - **Orientation**: a pure classifier over platform signals, legacy angles
//!   and the latest gravity sample, feeding an idempotent mode dispatcher
//! - **Timing Engine**: a monotonic, tick-driven accumulator shared by the
//!   countdown and stopwatch; pauses never count toward elapsed time
//! - **Alarm**: next-occurrence scheduling against local wall time
//! - **Dashboard**: the single controller owning all state, with one
//!   ingestion entry point for every orientation source
//!
//! ## Key Components
//!
//! - [`Dashboard`]: top-level controller
//! - [`Classifier`]: orientation classification
//! - [`TimingEngine`]: drift-corrected accumulator
//! - [`Config`]: application configuration management

pub mod alarm;
pub mod alert;
pub mod app;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod format;
pub mod orientation;
pub mod permission;
pub mod sensor;
pub mod timer;
pub mod weather;

pub use alarm::AlarmScheduler;
pub use alert::{AlertOutput, AlertSignal, AlertSink, SilentSink};
pub use app::{AppState, Dashboard, SensorUpdate};
pub use config::Config;
pub use dispatch::ModeDispatcher;
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use format::format_millis;
pub use orientation::{classify, Classifier, Mode, Panel, Viewport};
pub use permission::{MotionPermission, MotionPermissionProvider, PermissionGate};
pub use sensor::{GravityVector, SensorSampleStore};
pub use timer::{
    Clock, CountdownTimer, DurationInput, ManualClock, Phase, Stopwatch, SystemClock,
    TimingEngine,
};
pub use weather::{WeatherPanel, WeatherReadout, WeatherSource};
