use std::time::{Duration, Instant};

/// Drops movement inputs that arrive too soon after the last accepted one,
/// so key repeat cannot skip several cells at once.
#[derive(Clone, Debug)]
pub struct InputThrottle {
    interval: Duration,
    last_accepted: Option<Instant>,
}

impl InputThrottle {
    pub fn new(interval: Duration) -> Self {
        InputThrottle {
            interval,
            last_accepted: None,
        }
    }

    /// Accepts the input if strictly more than `interval` has passed.
    pub fn accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted {
            if now.saturating_duration_since(last) <= self.interval {
                return false;
            }
        }
        self.last_accepted = Some(now);
        true
    }
}
