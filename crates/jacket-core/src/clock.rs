//! Wall-clock source for the animations.
//!
//! Animations sample time in seconds as `f64`. `SystemClock` counts from its
//! own construction; `ManualClock` is advanced by hand to drive deterministic
//! frames.

use instant::Instant;
use std::sync::atomic::{AtomicU64, Ordering};

pub trait Clock: Send + Sync {
    /// Seconds since an arbitrary fixed origin.
    fn now(&self) -> f64;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    bits: AtomicU64,
}

impl ManualClock {
    pub fn new(start_sec: f64) -> Self {
        Self {
            bits: AtomicU64::new(start_sec.to_bits()),
        }
    }

    pub fn set(&self, sec: f64) {
        self.bits.store(sec.to_bits(), Ordering::SeqCst);
    }

    pub fn advance(&self, dt_sec: f64) {
        let _ = self
            .bits
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |bits| {
                Some((f64::from_bits(bits) + dt_sec).to_bits())
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}
