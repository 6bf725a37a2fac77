//! Single-slot frame request bookkeeping for the cooperative game loop.
//! This module exists so cancelling a frame is "replace the handle", never a per-component special case.
//! It does not own what a frame does.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Holds at most one pending frame request.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the next frame, superseding any request still pending.
    pub fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some(handle);
        handle
    }

    /// Drop `handle` if it is the pending request. Stale handles are ignored.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            return true;
        }
        false
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Called by the host at its refresh cadence; yields the request to run, if any.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requesting_replaces_the_pending_frame() {
        let mut scheduler = FrameScheduler::new();
        let first = scheduler.request_frame();
        let second = scheduler.request_frame();
        assert_ne!(first, second);
        assert_eq!(scheduler.pending(), Some(second));
        assert!(!scheduler.cancel(first), "stale handle must not cancel the live request");
        assert_eq!(scheduler.pending(), Some(second));
    }

    #[test]
    fn cancel_clears_the_live_request() {
        let mut scheduler = FrameScheduler::new();
        let handle = scheduler.request_frame();
        assert!(scheduler.cancel(handle));
        assert_eq!(scheduler.take_due(), None);
    }

    #[test]
    fn take_due_consumes_the_request() {
        let mut scheduler = FrameScheduler::new();
        let handle = scheduler.request_frame();
        assert_eq!(scheduler.take_due(), Some(handle));
        assert_eq!(scheduler.take_due(), None);
    }
}
