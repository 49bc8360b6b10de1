//! ADC contract
//!
//! Single-conversion, polled analog-to-digital converter.

/// Outcome of polling a conversion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    /// The conversion finished and the data register holds a fresh value
    Ready,
    /// The timeout expired first; the data register holds a stale value
    TimedOut,
}

impl Conversion {
    /// Check whether the conversion finished in time
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Conversion {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ready => defmt::write!(f, "Ready"),
            Self::TimedOut => defmt::write!(f, "TimedOut"),
        }
    }
}

/// Polled analog-to-digital converter
///
/// # Invariants
///
/// - `read_raw` never blocks; it returns whatever the data register holds
/// - `poll_for_conversion` returns within `timeout_ms`
pub trait AnalogConverter {
    /// Trigger one conversion
    fn start(&mut self);

    /// Busy-wait until the conversion completes or `timeout_ms` elapses
    fn poll_for_conversion(&mut self, timeout_ms: u32) -> Conversion;

    /// Stop the converter
    fn stop(&mut self);

    /// Read the data register
    fn read_raw(&mut self) -> u32;
}

impl<T: AnalogConverter + ?Sized> AnalogConverter for &mut T {
    fn start(&mut self) {
        T::start(self);
    }

    fn poll_for_conversion(&mut self, timeout_ms: u32) -> Conversion {
        T::poll_for_conversion(self, timeout_ms)
    }

    fn stop(&mut self) {
        T::stop(self);
    }

    fn read_raw(&mut self) -> u32 {
        T::read_raw(self)
    }
}
