//! Per-frame callback bookkeeping.
//!
//! A widget that is running holds exactly one active [`FrameHandle`]. The
//! host calls back with that handle on every frame; callbacks carrying a
//! cancelled handle are stale and must be ignored, which is what keeps a
//! late frame from accumulating time after a stop.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    next_id: u64,
    active: Option<FrameHandle>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the loop. Re-requesting while active returns the same
    /// handle instead of starting a second loop.
    pub fn request(&mut self) -> FrameHandle {
        if let Some(handle) = self.active {
            return handle;
        }
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.active = Some(handle);
        handle
    }

    pub fn cancel(&mut self) -> Option<FrameHandle> {
        self.active.take()
    }

    pub fn active(&self) -> Option<FrameHandle> {
        self.active
    }

    pub fn accepts(&self, handle: FrameHandle) -> bool {
        self.active == Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_is_idempotent_while_active() {
        let mut frames = FrameLoop::new();
        let a = frames.request();
        let b = frames.request();
        assert_eq!(a, b);
    }

    #[test]
    fn cancelled_handle_is_rejected() {
        let mut frames = FrameLoop::new();
        let old = frames.request();
        frames.cancel();
        assert!(!frames.accepts(old));
        let new = frames.request();
        assert_ne!(old, new);
        assert!(frames.accepts(new));
        assert!(!frames.accepts(old));
    }
}
