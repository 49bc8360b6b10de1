//! GPIO Abstractions
//!
//! Pins are plain `embedded-hal` 1.0 digital pins. The drivers here only
//! accept pins whose error type is `Infallible` (true for on-chip GPIO), so
//! reading or driving a pin can never fail half way through a measurement.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin};

/// Logic level of a pin
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Level {
    /// Logic 0
    #[default]
    Low,
    /// Logic 1
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Self::High
        } else {
            Self::Low
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Level {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Low => defmt::write!(f, "Low"),
            Self::High => defmt::write!(f, "High"),
        }
    }
}

/// Drive an output pin to a level
pub fn write<P>(pin: &mut P, level: Level)
where
    P: OutputPin<Error = Infallible> + ?Sized,
{
    let result = match level {
        Level::Low => pin.set_low(),
        Level::High => pin.set_high(),
    };
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Sample the level of an input pin
pub fn read<P>(pin: &mut P) -> Level
where
    P: InputPin<Error = Infallible> + ?Sized,
{
    match pin.is_high() {
        Ok(high) => Level::from(high),
        Err(never) => match never {},
    }
}
