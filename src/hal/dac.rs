//! DAC contract
//!
//! Digital-to-analog converter channels with selectable data alignment.

/// Data holding register layout of a DAC write
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DacAlignment {
    /// 8-bit, right aligned
    Bits8Right,
    /// 12-bit, left aligned
    ///
    /// Callers still pass a 12-bit code; the register shifts it into bits 15:4.
    Bits12Left,
    /// 12-bit, right aligned
    #[default]
    Bits12Right,
}

impl DacAlignment {
    /// Largest code for this data width
    #[must_use]
    pub const fn full_scale(self) -> u16 {
        match self {
            Self::Bits8Right => 255,
            Self::Bits12Left | Self::Bits12Right => 4095,
        }
    }

    /// Code to hand the driver, saturated at full scale and never shifted
    #[must_use]
    pub const fn register_code(self, value: u16) -> u16 {
        let full = self.full_scale();
        if value > full { full } else { value }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DacAlignment {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Bits8Right => defmt::write!(f, "8R"),
            Self::Bits12Left => defmt::write!(f, "12L"),
            Self::Bits12Right => defmt::write!(f, "12R"),
        }
    }
}

/// Digital-to-analog converter
///
/// `value` is the output code, from 0 to the alignment's full scale.
/// Implementations place it in the register that matches `alignment`.
pub trait DacPeripheral {
    /// Channel selector
    type Channel: Copy;

    /// Enable a channel
    fn start(&mut self, channel: Self::Channel);

    /// Disable a channel
    fn stop(&mut self, channel: Self::Channel);

    /// Write an output code
    fn set_value(&mut self, channel: Self::Channel, alignment: DacAlignment, value: u16);
}

impl<T: DacPeripheral + ?Sized> DacPeripheral for &mut T {
    type Channel = T::Channel;

    fn start(&mut self, channel: Self::Channel) {
        T::start(self, channel);
    }

    fn stop(&mut self, channel: Self::Channel) {
        T::stop(self, channel);
    }

    fn set_value(&mut self, channel: Self::Channel, alignment: DacAlignment, value: u16) {
        T::set_value(self, channel, alignment, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_aligned_code_is_not_shifted() {
        assert_eq!(DacAlignment::Bits12Left.register_code(256), 256);
        assert_eq!(DacAlignment::Bits12Left.register_code(4095), 4095);
    }

    #[test]
    fn codes_saturate_at_full_scale() {
        assert_eq!(DacAlignment::Bits12Left.register_code(5000), 4095);
        assert_eq!(DacAlignment::Bits12Right.register_code(4096), 4095);
        assert_eq!(DacAlignment::Bits8Right.register_code(300), 255);
        assert_eq!(DacAlignment::Bits8Right.register_code(17), 17);
    }
}
