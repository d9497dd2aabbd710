mod clock;
mod countdown;
mod engine;
mod frame;
mod stopwatch;

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{CountdownTimer, DurationInput};
pub use engine::{Phase, TimingEngine};
pub use frame::{FrameHandle, FrameLoop};
pub use stopwatch::{Lap, Stopwatch};
