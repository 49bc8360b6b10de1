//! Tick Timer
//!
//! Wraps a [`TickCounter`] with reset, busy-wait sleep and bounded
//! condition polling. Elapsed time is accumulated read by read, so a wait
//! longer than the counter width (e.g. 100 000 ticks on a 16-bit timer)
//! still terminates.

use crate::hal::timer::{ticks_between, TickCounter};

/// Result of a bounded wait
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Wait {
    /// The condition became true
    Ready {
        /// Ticks counted up to the last read before the condition was seen
        elapsed: u64,
    },
    /// The tick ceiling was reached first
    TimedOut {
        /// Ticks counted before giving up (at least the ceiling)
        elapsed: u64,
    },
}

impl Wait {
    /// Check whether the condition was met
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Ticks spent waiting
    pub const fn elapsed(self) -> u64 {
        match self {
            Self::Ready { elapsed } | Self::TimedOut { elapsed } => elapsed,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Wait {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ready { elapsed } => defmt::write!(f, "Ready({=u64})", elapsed),
            Self::TimedOut { elapsed } => defmt::write!(f, "TimedOut({=u64})", elapsed),
        }
    }
}

/// Free-running timer
///
/// Starts the counter on construction and stops it on drop. Not `Clone`:
/// the timer is the single owner of its counter register.
pub struct Timer<C: TickCounter> {
    counter: C,
}

impl<C: TickCounter> Timer<C> {
    /// Take ownership of a counter and start it
    pub fn new(mut counter: C) -> Self {
        counter.start();
        Self { counter }
    }

    /// Current tick count
    #[must_use]
    pub fn read(&self) -> u32 {
        self.counter.counter()
    }

    /// Zero the counter
    pub fn reset(&mut self) {
        self.set(0);
    }

    /// Load the counter with a tick value
    pub fn set(&mut self, ticks: u32) {
        self.counter.set_counter(ticks);
    }

    /// The underlying counter
    #[must_use]
    pub fn counter(&self) -> &C {
        &self.counter
    }

    /// Busy-wait for `ticks`
    ///
    /// Resets the counter first, like every wait on this timer.
    pub fn sleep_for(&mut self, ticks: u32) {
        let _ = self.wait_until(ticks, || false);
    }

    /// Reset the counter, then poll `done` until it returns `true` or
    /// `limit` ticks have elapsed
    ///
    /// `done` is evaluated before each counter read. When it fires the
    /// counter is left untouched, so the caller can read the exact tick
    /// count at the moment the condition was seen.
    pub fn wait_until<F>(&mut self, limit: u32, mut done: F) -> Wait
    where
        F: FnMut() -> bool,
    {
        self.reset();
        let max_count = self.counter.max_count();
        let limit = u64::from(limit);
        let mut last = 0;
        let mut elapsed = 0;

        loop {
            if done() {
                return Wait::Ready { elapsed };
            }

            let now = self.read();
            elapsed += ticks_between(last, now, max_count);
            last = now;

            if elapsed >= limit {
                return Wait::TimedOut { elapsed };
            }
            core::hint::spin_loop();
        }
    }
}

impl<C: TickCounter> Drop for Timer<C> {
    fn drop(&mut self) {
        self.counter.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Counter that advances one tick per read
    struct StepCounter {
        value: Cell<u32>,
        max: u32,
        running: bool,
    }

    impl StepCounter {
        fn new(max: u32) -> Self {
            Self {
                value: Cell::new(0),
                max,
                running: false,
            }
        }
    }

    impl TickCounter for StepCounter {
        fn start(&mut self) {
            self.running = true;
        }

        fn stop(&mut self) {
            self.running = false;
        }

        fn counter(&self) -> u32 {
            let v = self.value.get();
            self.value.set(if v == self.max { 0 } else { v + 1 });
            v
        }

        fn set_counter(&mut self, ticks: u32) {
            self.value.set(ticks);
        }

        fn max_count(&self) -> u32 {
            self.max
        }
    }

    #[test]
    fn new_starts_counter() {
        let timer = Timer::new(StepCounter::new(u32::MAX));
        assert!(timer.counter().running);
    }

    #[test]
    fn reset_zeroes_counter() {
        let mut timer = Timer::new(StepCounter::new(u32::MAX));
        timer.set(1234);
        assert_eq!(timer.read(), 1234);
        timer.reset();
        assert_eq!(timer.read(), 0);
    }

    #[test]
    fn wait_times_out_at_limit() {
        let mut timer = Timer::new(StepCounter::new(u32::MAX));
        let wait = timer.wait_until(500, || false);
        assert_eq!(wait, Wait::TimedOut { elapsed: 500 });
    }

    #[test]
    fn wait_ready_immediately() {
        let mut timer = Timer::new(StepCounter::new(u32::MAX));
        let wait = timer.wait_until(500, || true);
        assert!(wait.is_ready());
        assert_eq!(wait.elapsed(), 0);
    }

    #[test]
    fn wait_longer_than_counter_width() {
        let mut timer = Timer::new(StepCounter::new(0xFF));
        let wait = timer.wait_until(1_000, || false);
        assert!(!wait.is_ready());
        assert_eq!(wait.elapsed(), 1_000);
    }
}
