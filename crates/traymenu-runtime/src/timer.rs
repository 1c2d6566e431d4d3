#![forbid(unsafe_code)]

//! Single-slot repeating timer.
//!
//! A [`TimerSlot`] is the one timer an owner (a panel's fade controller) is
//! allowed to have. Arming it again replaces the previous schedule in place,
//! so two ramps can never tick concurrently.
//!
//! # Invariants
//!
//! 1. At most one schedule is armed per slot at any time.
//! 2. `arm` never allocates; it overwrites the slot and bumps `generation`.
//! 3. `cancel` is idempotent and safe at any point, including mid-interval.
//! 4. Time polled while disarmed is discarded, never banked for later.

use std::time::Duration;

/// One cancel-and-replace repeating timer driven by the host loop.
#[derive(Debug, Default)]
pub struct TimerSlot {
    interval: Duration,
    armed: bool,
    /// Time accumulated since the last whole interval fired.
    carry: Duration,
    /// Incremented on every `arm`.
    generation: u64,
}

impl TimerSlot {
    /// Create a disarmed slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: Duration::ZERO,
            armed: false,
            carry: Duration::ZERO,
            generation: 0,
        }
    }

    /// Arm the slot with a repeating `interval`, replacing any armed schedule.
    ///
    /// A zero interval is bumped to one nanosecond.
    pub fn arm(&mut self, interval: Duration) {
        let replaced = self.armed;
        self.interval = if interval.is_zero() {
            Duration::from_nanos(1)
        } else {
            interval
        };
        self.armed = true;
        self.carry = Duration::ZERO;
        self.generation = self.generation.wrapping_add(1);
        tracing::trace!(
            generation = self.generation,
            interval_us = self.interval.as_micros() as u64,
            replaced,
            "timer armed"
        );
    }

    /// Disarm the slot. Returns whether a schedule was armed.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.armed;
        self.armed = false;
        self.carry = Duration::ZERO;
        if was_armed {
            tracing::trace!(generation = self.generation, "timer cancelled");
        }
        was_armed
    }

    /// Whether a schedule is currently armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// The armed interval, if any.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.armed.then_some(self.interval)
    }

    /// Number of times the slot has been armed.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Account for `elapsed` wall time and return how many whole intervals fired.
    ///
    /// Partial intervals carry over to the next poll.
    pub fn poll(&mut self, elapsed: Duration) -> u32 {
        if !self.armed {
            return 0;
        }
        self.carry = self.carry.saturating_add(elapsed);
        let interval_ns = self.interval.as_nanos();
        let fired = self.carry.as_nanos() / interval_ns;
        let consumed = fired * interval_ns;
        let remaining = self.carry.as_nanos() - consumed;
        self.carry = Duration::from_nanos(u64::try_from(remaining).unwrap_or(u64::MAX));
        u32::try_from(fired).unwrap_or(u32::MAX)
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        if self.armed {
            tracing::trace!(generation = self.generation, "timer released on drop");
        }
    }
}
