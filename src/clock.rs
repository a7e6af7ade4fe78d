//! Monotonic tick sources for phase timing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// A monotonic tick counter with a known frequency.
///
/// The original target hardware read a 512 MHz timebase register straight
/// from assembly. Putting the two operations behind a trait keeps the
/// pipeline portable and lets tests substitute a deterministic source.
pub trait Clock {
    /// Sample the current tick count.
    fn now_ticks(&self) -> u64;

    /// Ticks per second.
    fn frequency(&self) -> u64;
}

/// Wall-clock ticks from [`Instant`], one tick per nanosecond.
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
    fn now_ticks(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }

    fn frequency(&self) -> u64 {
        1_000_000_000
    }
}

/// Deterministic clock for tests.
///
/// Every sample advances the counter by a fixed step, so the k-th sample
/// reads `(k - 1) * step` and phase durations come out as exact multiples
/// of `step / frequency`.
pub struct FakeClock {
    ticks: AtomicU64,
    step: u64,
    frequency: u64,
}

impl FakeClock {
    pub fn new(step: u64, frequency: u64) -> Self {
        Self {
            ticks: AtomicU64::new(0),
            step,
            frequency,
        }
    }
}

impl Clock for FakeClock {
    fn now_ticks(&self) -> u64 {
        self.ticks.fetch_add(self.step, Ordering::Relaxed)
    }

    fn frequency(&self) -> u64 {
        self.frequency
    }
}
