//! Trailing-edge debounce for container resize notifications.

use std::time::{Duration, Instant};

/// Coalesces bursts of resize requests into one resize after a quiet period.
#[derive(Debug, Clone)]
pub struct ResizeThrottle {
    delay: Duration,
    last_request: Option<Instant>,
}

impl ResizeThrottle {
    /// Creates a throttle with the given quiet period.
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request: None,
        }
    }

    /// Quiet period.
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a request, restarting the quiet period.
    pub fn request(&mut self, now: Instant) {
        self.last_request = Some(now);
    }

    /// Whether a request is waiting.
    pub const fn is_pending(&self) -> bool {
        self.last_request.is_some()
    }

    /// Consumes the pending request if the quiet period has elapsed.
    pub fn take_ready(&mut self, now: Instant) -> bool {
        match self.last_request {
            Some(last) if now.saturating_duration_since(last) >= self.delay => {
                self.last_request = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending request.
    pub fn cancel(&mut self) {
        self.last_request = None;
    }
}
