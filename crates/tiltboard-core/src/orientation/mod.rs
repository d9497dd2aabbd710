//! Device orientation: the four display modes and the classifier that
//! resolves platform signals and raw gravity into one of them.

mod classifier;
mod mode;

pub use classifier::{classify, legacy_angle_mode, Classifier, OrientationThresholds, Viewport};
pub use mode::{Mode, Panel, DETECTING_LABEL};
