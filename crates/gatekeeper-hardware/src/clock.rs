//! System clock backed by [`std::time::Instant`].

use std::time::Instant;

use crate::traits::Clock;

/// Monotonic clock counting milliseconds since its creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        // u64 milliseconds outlast the process by several hundred million years
        self.origin.elapsed().as_millis() as u64
    }
}
