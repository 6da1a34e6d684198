//! Clock abstraction for timing-sensitive detectors
//!
//! Hold and double-activation windows are measured in elapsed wall-clock
//! time, not sample count, which makes the gesture path tolerant of
//! irregular sampling cadence. The classifier takes `now` as an argument
//! and never reads a clock itself; implementations of [`Clock`] supply
//! `now` so tests can drive time without real delays.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Source of elapsed time since an epoch owned by the implementation.
///
/// Successive calls must return non-decreasing values; time moving
/// backward is a precondition violation the detectors do not defend
/// against.
pub trait Clock: Send + Sync {
    /// Elapsed time since the clock's epoch.
    fn now(&self) -> Duration;
}

/// Monotonic wall clock backed by [`Instant`], epoch at construction.
#[derive(Debug)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock { epoch: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Manually advanced clock for deterministic tests.
///
/// Microsecond resolution, which is finer than any realistic sampling
/// cadence the detectors see.
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock { micros: AtomicU64::new(0) }
    }

    /// Jump the clock to an absolute elapsed time.
    pub fn set(&self, now: Duration) {
        self.micros.store(now.as_micros() as u64, Ordering::SeqCst);
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.micros.fetch_add(by.as_micros() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::SeqCst))
    }
}
