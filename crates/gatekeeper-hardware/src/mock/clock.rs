//! Manually advanced clock for deterministic timing tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::traits::Clock;

/// Clock whose time only moves when told to.
///
/// Clones share the same time, so a test can keep one clone while the
/// controller owns another.
///
/// # Examples
///
/// ```
/// use gatekeeper_hardware::mock::ManualClock;
/// use gatekeeper_hardware::traits::Clock;
///
/// let clock = ManualClock::new();
/// let controller_clock = clock.clone();
///
/// clock.advance(300);
/// assert_eq!(controller_clock.now_ms(), 300);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock reading `now_ms`.
    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms: Arc::new(AtomicU64::new(now_ms)),
        }
    }

    /// Move time forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jump to an absolute time. Callers must not move time backwards.
    pub fn set(&self, now_ms: u64) {
        debug_assert!(now_ms >= self.now_ms(), "ManualClock must not go backwards");
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_set() {
        let clock = ManualClock::starting_at(100);
        clock.advance(50);
        assert_eq!(clock.now_ms(), 150);

        clock.set(1000);
        assert_eq!(clock.now_ms(), 1000);
    }
}
