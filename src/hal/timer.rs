//! Tick counter contract
//!
//! A free-running up-counter, usually a timer clocked at 1 MHz.

/// Free-running up-counter
///
/// The counter counts from 0 to [`max_count`](Self::max_count) and wraps
/// back to 0.
pub trait TickCounter {
    /// Start counting
    fn start(&mut self);

    /// Stop counting
    fn stop(&mut self);

    /// Current counter value
    fn counter(&self) -> u32;

    /// Load the counter register
    fn set_counter(&mut self, ticks: u32);

    /// Value the counter reaches right before it wraps to 0
    fn max_count(&self) -> u32 {
        u32::MAX
    }
}

impl<T: TickCounter + ?Sized> TickCounter for &mut T {
    fn start(&mut self) {
        T::start(self);
    }

    fn stop(&mut self) {
        T::stop(self);
    }

    fn counter(&self) -> u32 {
        T::counter(self)
    }

    fn set_counter(&mut self, ticks: u32) {
        T::set_counter(self, ticks);
    }

    fn max_count(&self) -> u32 {
        T::max_count(self)
    }
}

/// Ticks from `from` to `to` on a counter that wraps after `max_count`
#[must_use]
pub fn ticks_between(from: u32, to: u32, max_count: u32) -> u64 {
    if to >= from {
        u64::from(to - from)
    } else {
        u64::from(max_count - from) + u64::from(to) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_between_forward() {
        assert_eq!(ticks_between(10, 25, u32::MAX), 15);
        assert_eq!(ticks_between(7, 7, 65_535), 0);
    }

    #[test]
    fn ticks_between_wraps_16_bit() {
        // 65_530 -> 65_535 -> 0 -> 4
        assert_eq!(ticks_between(65_530, 4, 65_535), 10);
    }

    #[test]
    fn ticks_between_wraps_32_bit() {
        assert_eq!(ticks_between(u32::MAX, 0, u32::MAX), 1);
    }
}
