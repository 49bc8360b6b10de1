//! Hardware Abstraction Layer
//!
//! The channels in this crate only talk to hardware through the traits
//! defined here. Each trait is the minimal register-level contract of one
//! peripheral kind; `&mut T` implements it whenever `T` does, so a channel
//! can either own its peripheral or borrow it.
//!
//! With the `embedded` feature, [`stm32`] implements the traits on top of
//! embassy-stm32.

pub mod adc;
pub mod dac;
pub mod gpio;
pub mod pwm;
pub mod timer;

#[cfg(feature = "embedded")]
pub mod stm32;

pub use adc::{AnalogConverter, Conversion};
pub use dac::{DacAlignment, DacPeripheral};
pub use gpio::Level;
pub use pwm::CompareOutput;
pub use timer::TickCounter;
