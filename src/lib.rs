//! STM32 Calibrated Peripheral Library
//!
//! This library converts between raw STM32F4 peripheral registers (ADC
//! counts, timer compare values, GPIO edges, free-running counter ticks)
//! and application units such as degrees, percent or centimetres. Every
//! hardware poll is bounded by a timeout or a tick ceiling.
//!
//! # Architecture
//!
//! The library is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CHANNEL LAYER                            │
//! │  AnalogInput  │  PwmOutput  │  DacOutput  │  EchoSensor     │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   CALIBRATION CORE                          │
//! │  LinearMap  │  MedianFilter  │  Timer (bounded waits)       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  HAL CONTRACT LAYER                         │
//! │ AnalogConverter │ CompareOutput │ DacPeripheral │ TickCounter │
//! ├─────────────────────────────────────────────────────────────┤
//! │            embassy-stm32 bindings  /  host mocks            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Validated configuration**: ranges and windows are checked by
//!   `const fn` constructors, so a bad `const` configuration fails to build
//! - **Move-only channels**: one channel owns one peripheral channel
//! - **Bounded latency**: timeouts degrade to best-effort or sentinel values
//!   instead of errors
//! - **Functional core, imperative shell**: conversion math is pure and
//!   tested on the host

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

// Must come first so the logging macros are visible to every module below.
#[macro_use]
mod fmt;

/// Hardware Abstraction Layer
///
/// Collaborator traits for the raw peripherals, plus embassy-stm32
/// implementations when the `embedded` feature is on.
pub mod hal;

/// Free-running tick timer with bounded busy-waits
pub mod timer;

/// Calibrated analog, PWM and DAC channels
pub mod channel;

/// Echo-timing distance sensors
pub mod sensor;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Simulated peripherals for host tests
#[cfg(all(feature = "std", not(feature = "embedded")))]
pub mod mock;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::channel::{
        AnalogInput, AnalogInputConfig, DacConfig, DacOutput, MedianFilter, PwmConfig, PwmOutput,
    };
    pub use crate::config::*;
    pub use crate::hal::{AnalogConverter, CompareOutput, DacAlignment, DacPeripheral, TickCounter};
    pub use crate::sensor::{EchoConfig, EchoOutcome, EchoSensor, Hcsr04};
    pub use crate::timer::{Timer, Wait};
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::digital::{InputPin, OutputPin};

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}
