//! Simulated peripherals for host tests
//!
//! Each mock records what the driver did to it so tests can assert on
//! register writes and start/stop calls. Pass mocks by `&mut` to keep them
//! inspectable after the channel is dropped.
//!
//! Time is simulated by [`SimClock`]: every counter read advances it by
//! one tick, and the echo pin derives its level from the clock, so a
//! measurement runs deterministically without real delays.

mod adc;
mod clock;
mod dac;
mod pwm;

pub use adc::MockAdc;
pub use clock::{EchoProfile, SimClock, SimCounter, SimEcho, SimTrigger};
pub use dac::MockDac;
pub use pwm::MockPwm;
