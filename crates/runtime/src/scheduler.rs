use std::collections::BTreeSet;

/// Ticket for one requested display-frame callback.
///
/// A handle is only ever issued once; a callback delivered with a handle the
/// owner no longer holds is stale and must be ignored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// The platform's display-refresh callback queue.
pub trait FrameScheduler {
    /// Ask for one callback on the next display frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a pending request. Cancelling an unknown or already
    /// delivered handle is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Frame scheduler driven by hand, for headless hosts and tests.
///
/// Pending handles are delivered in request order by [`ManualFrameScheduler::take_due`].
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    next_id: u64,
    pending: BTreeSet<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every pending handle, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    /// Handles that were withdrawn while still pending.
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.remove(&handle) {
            self.cancelled.push(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameHandle, FrameScheduler, ManualFrameScheduler};

    #[test]
    fn issues_unique_handles_in_order() {
        let mut sched = ManualFrameScheduler::new();
        let a = sched.request_frame();
        let b = sched.request_frame();
        assert_ne!(a, b);
        assert_eq!(sched.take_due(), vec![a, b]);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn cancel_removes_pending_request() {
        let mut sched = ManualFrameScheduler::new();
        let a = sched.request_frame();
        sched.cancel_frame(a);
        assert!(!sched.is_pending(a));
        assert_eq!(sched.cancelled(), &[a]);
        assert!(sched.take_due().is_empty());
    }

    #[test]
    fn cancel_of_delivered_handle_is_ignored() {
        let mut sched = ManualFrameScheduler::new();
        let a = sched.request_frame();
        let _ = sched.take_due();
        sched.cancel_frame(a);
        sched.cancel_frame(FrameHandle(99));
        assert!(sched.cancelled().is_empty());
    }
}
