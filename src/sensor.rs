//! Distance Sensors
//!
//! Echo-timing rangefinders such as the HC-SR04: a trigger pulse starts a
//! ping, and the width of the echo pulse is proportional to the distance.

pub mod echo;

pub use echo::{EchoConfig, EchoOutcome, EchoSensor, EchoState};

/// HC-SR04 ultrasonic rangefinder
pub type Hcsr04<T, E> = EchoSensor<T, E>;
