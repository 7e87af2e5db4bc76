//! Display-refresh callback scheduling
//!
//! The particle field never loops on its own. It asks a `FrameScheduler`
//! for one callback on the next display refresh, and re-requests from inside
//! that callback, forming a chain that `stop` breaks by cancelling the
//! pending request.

pub mod driver;

pub use driver::RefreshDriver;

/// Identifies one requested refresh callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Trait for hosts that deliver display-refresh callbacks
pub trait FrameScheduler {
    /// Ask for a callback on the next refresh
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a pending request; unknown or already-fired handles are ignored
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Host-side queue of pending refresh callbacks
///
/// Every request made before a refresh fires on that refresh, in request order.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Vec<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the callbacks due on this refresh
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    /// Number of callbacks waiting for the next refresh
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|pending| *pending != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_fire_once_in_order() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();
        assert_ne!(a, b);
        assert_eq!(queue.pending(), 2);

        assert_eq!(queue.take_due(), vec![a, b]);
        assert!(queue.take_due().is_empty());
    }

    #[test]
    fn test_cancel_removes_only_that_request() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();

        queue.cancel_frame(a);
        queue.cancel_frame(a);
        assert_eq!(queue.take_due(), vec![b]);

        // Cancelling a handle that already fired is harmless
        queue.cancel_frame(b);
        assert_eq!(queue.pending(), 0);
    }
}
