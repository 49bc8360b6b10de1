//! Calibrated Channels
//!
//! Channels bind one peripheral channel to a physical range and convert in
//! both directions through a [`LinearMap`].
//!
//! Rounding is the same everywhere: physical values become register values
//! by truncation toward zero, and register values become physical values by
//! rounding half away from zero.

pub mod analog_input;
pub mod dac_output;
pub mod linear;
pub mod median;
pub mod pwm_output;

pub use analog_input::{AnalogInput, AnalogInputConfig};
pub use dac_output::{DacConfig, DacOutput};
pub use linear::LinearMap;
pub use median::MedianFilter;
pub use pwm_output::{PwmConfig, PwmOutput};
