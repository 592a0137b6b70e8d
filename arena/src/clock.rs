//! Injected time source
//!
//! All protocol windows compare against a host-supplied clock so tests can
//! drive time by hand.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// Monotonic wall clock in whole seconds.
pub trait Clock {
    fn now(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

/// Real wall time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0)
    }
}

/// Hand-driven clock for tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<u64>,
}

impl ManualClock {
    pub fn new(now: u64) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Jump to an absolute timestamp.
    pub fn set(&self, now: u64) {
        *self.now.lock() = now;
    }

    /// Move forward.
    pub fn advance(&self, seconds: u64) {
        *self.now.lock() += seconds;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        *self.now.lock()
    }
}
