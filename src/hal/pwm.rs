//! PWM contract
//!
//! Timer output-compare channels driving a PWM signal.

/// Timer with output-compare channels
///
/// The duty cycle of a channel is `compare / resolution`, where
/// `resolution` is the auto-reload period plus one.
///
/// # Invariants
///
/// - `resolution` is fixed for the lifetime of the peripheral
/// - Only one owner drives a given channel
pub trait CompareOutput {
    /// Channel selector
    type Channel: Copy;

    /// Enable the PWM output of a channel
    fn start(&mut self, channel: Self::Channel);

    /// Disable the PWM output of a channel
    fn stop(&mut self, channel: Self::Channel);

    /// Write the compare register of a channel
    fn set_compare(&mut self, channel: Self::Channel, value: u32);

    /// Read back the compare register of a channel
    fn compare(&mut self, channel: Self::Channel) -> u32;

    /// Number of counter steps in one period (period + 1)
    fn resolution(&self) -> u32;
}

impl<T: CompareOutput + ?Sized> CompareOutput for &mut T {
    type Channel = T::Channel;

    fn start(&mut self, channel: Self::Channel) {
        T::start(self, channel);
    }

    fn stop(&mut self, channel: Self::Channel) {
        T::stop(self, channel);
    }

    fn set_compare(&mut self, channel: Self::Channel, value: u32) {
        T::set_compare(self, channel, value);
    }

    fn compare(&mut self, channel: Self::Channel) -> u32 {
        T::compare(self, channel)
    }

    fn resolution(&self) -> u32 {
        T::resolution(self)
    }
}
