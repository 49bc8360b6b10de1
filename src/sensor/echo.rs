//! Echo-timing distance sensor
//!
//! One measurement is a synchronous cycle:
//!
//! ```text
//! Idle -> Triggering -> AwaitingRise -> AwaitingFall -> Converting -> Idle
//! ```
//!
//! Each edge wait is bounded by a tick ceiling. A missing edge ends the
//! cycle early with the out-of-range distance; the settle delay in
//! `Converting` runs on every path so back-to-back measurements never
//! catch the previous ping.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::{
    ECHO_OUT_OF_RANGE_CM, ECHO_SETTLE_TICKS, ECHO_TICKS_PER_CM, ECHO_TIMEOUT_TICKS,
    ECHO_TRIGGER_PULSE_TICKS,
};
use crate::hal::gpio::{self, Level};
use crate::hal::timer::TickCounter;
use crate::timer::Timer;
use crate::types::{ConfigError, Distance};

/// Timing of an echo sensor, in timer ticks
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EchoConfig {
    trigger_pulse_ticks: u32,
    timeout_ticks: u32,
    ticks_per_cm: f32,
    settle_ticks: u32,
    out_of_range: Distance,
}

impl EchoConfig {
    /// HC-SR04 on a 1 MHz timer
    pub const HCSR04: Self = Self::new(
        ECHO_TRIGGER_PULSE_TICKS,
        ECHO_TIMEOUT_TICKS,
        ECHO_TICKS_PER_CM,
        ECHO_SETTLE_TICKS,
    );

    /// Create a timing configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] if the trigger pulse or the
    /// edge ceiling is zero, or [`ConfigError::InvalidCoefficient`] unless
    /// `ticks_per_cm > 0`.
    pub const fn try_new(
        trigger_pulse_ticks: u32,
        timeout_ticks: u32,
        ticks_per_cm: f32,
        settle_ticks: u32,
    ) -> Result<Self, ConfigError> {
        if trigger_pulse_ticks == 0 || timeout_ticks == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if !(ticks_per_cm > 0.0) {
            return Err(ConfigError::InvalidCoefficient);
        }
        Ok(Self {
            trigger_pulse_ticks,
            timeout_ticks,
            ticks_per_cm,
            settle_ticks,
            out_of_range: Distance::from_cm(ECHO_OUT_OF_RANGE_CM),
        })
    }

    /// Create a timing configuration
    ///
    /// # Panics
    ///
    /// Panics on the conditions reported by [`try_new`](Self::try_new).
    #[must_use]
    pub const fn new(
        trigger_pulse_ticks: u32,
        timeout_ticks: u32,
        ticks_per_cm: f32,
        settle_ticks: u32,
    ) -> Self {
        match Self::try_new(trigger_pulse_ticks, timeout_ticks, ticks_per_cm, settle_ticks) {
            Ok(config) => config,
            Err(e) => e.panic(),
        }
    }

    /// Override the distance reported when an edge never arrives
    #[must_use]
    pub const fn with_out_of_range(mut self, distance: Distance) -> Self {
        self.out_of_range = distance;
        self
    }

    /// Trigger pulse width
    #[must_use]
    pub const fn trigger_pulse_ticks(&self) -> u32 {
        self.trigger_pulse_ticks
    }

    /// Ceiling for each edge wait
    #[must_use]
    pub const fn timeout_ticks(&self) -> u32 {
        self.timeout_ticks
    }

    /// Echo ticks per centimetre
    #[must_use]
    pub const fn ticks_per_cm(&self) -> f32 {
        self.ticks_per_cm
    }

    /// Guard delay after each measurement
    #[must_use]
    pub const fn settle_ticks(&self) -> u32 {
        self.settle_ticks
    }

    /// Sentinel distance
    #[must_use]
    pub const fn out_of_range(&self) -> Distance {
        self.out_of_range
    }
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self::HCSR04
    }
}

/// Phase of the measurement cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EchoState {
    /// Between measurements
    #[default]
    Idle,
    /// Trigger pin held high
    Triggering,
    /// Waiting for the echo pin to go high
    AwaitingRise,
    /// Timing the echo pulse
    AwaitingFall,
    /// Converting and waiting for the echo to die out
    Converting,
}

/// Raw result of one measurement cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EchoOutcome {
    /// Echo pulse measured
    Echo {
        /// Pulse width in timer ticks
        ticks: u32,
    },
    /// The echo pin never went high
    RiseTimeout,
    /// The echo pin never went low again
    FallTimeout,
}

impl EchoOutcome {
    /// Distance for this outcome; timeouts give the sentinel
    #[must_use]
    pub fn distance(self, config: &EchoConfig) -> Distance {
        match self {
            Self::Echo { ticks } => Distance::from_echo_ticks(ticks, config.ticks_per_cm),
            Self::RiseTimeout | Self::FallTimeout => config.out_of_range,
        }
    }

    /// Check whether an echo was timed
    #[must_use]
    pub const fn is_echo(self) -> bool {
        matches!(self, Self::Echo { .. })
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for EchoOutcome {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Echo { ticks } => defmt::write!(f, "Echo({=u32} ticks)", ticks),
            Self::RiseTimeout => defmt::write!(f, "RiseTimeout"),
            Self::FallTimeout => defmt::write!(f, "FallTimeout"),
        }
    }
}

/// Echo-timing rangefinder on a trigger and an echo pin
///
/// The sensor owns its pins; the timer is borrowed per measurement so it
/// can be shared with other code between measurements.
pub struct EchoSensor<T, E>
where
    T: OutputPin<Error = Infallible>,
    E: InputPin<Error = Infallible>,
{
    trigger: T,
    echo: E,
    config: EchoConfig,
    state: EchoState,
    last: Option<EchoOutcome>,
}

impl<T, E> EchoSensor<T, E>
where
    T: OutputPin<Error = Infallible>,
    E: InputPin<Error = Infallible>,
{
    /// HC-SR04 timing
    pub fn new(trigger: T, echo: E) -> Self {
        Self::with_config(trigger, echo, EchoConfig::HCSR04)
    }

    /// Custom timing; drives the trigger low
    pub fn with_config(mut trigger: T, echo: E, config: EchoConfig) -> Self {
        gpio::write(&mut trigger, Level::Low);
        Self {
            trigger,
            echo,
            config,
            state: EchoState::Idle,
            last: None,
        }
    }

    /// Timing configuration
    #[must_use]
    pub fn config(&self) -> &EchoConfig {
        &self.config
    }

    /// Current phase; `Idle` whenever no measurement is running
    #[must_use]
    pub fn state(&self) -> EchoState {
        self.state
    }

    /// Outcome of the previous measurement
    #[must_use]
    pub fn last_outcome(&self) -> Option<EchoOutcome> {
        self.last
    }

    /// Release the pins
    pub fn release(self) -> (T, E) {
        (self.trigger, self.echo)
    }

    /// Measure a distance
    ///
    /// Always returns a value: a missing edge reports the configured
    /// out-of-range distance.
    pub fn measure<C: TickCounter>(&mut self, timer: &mut Timer<C>) -> Distance {
        let outcome = self.measure_echo(timer);
        let distance = outcome.distance(&self.config);
        debug!("echo distance {} cm", distance.as_cm());
        distance
    }

    /// Run one measurement cycle and return the raw outcome
    pub fn measure_echo<C: TickCounter>(&mut self, timer: &mut Timer<C>) -> EchoOutcome {
        let outcome = self.ping(timer);
        self.state = EchoState::Converting;
        timer.sleep_for(self.config.settle_ticks);
        self.state = EchoState::Idle;
        self.last = Some(outcome);
        outcome
    }

    fn ping<C: TickCounter>(&mut self, timer: &mut Timer<C>) -> EchoOutcome {
        let limit = self.config.timeout_ticks;

        self.state = EchoState::Triggering;
        gpio::write(&mut self.trigger, Level::High);
        timer.sleep_for(self.config.trigger_pulse_ticks);
        gpio::write(&mut self.trigger, Level::Low);

        let echo = &mut self.echo;

        self.state = EchoState::AwaitingRise;
        if !timer.wait_until(limit, || gpio::read(echo) == Level::High).is_ready() {
            warn!("echo rise timed out after {} ticks", limit);
            return EchoOutcome::RiseTimeout;
        }

        // The fall wait restarts the timer, so its count is the pulse width
        self.state = EchoState::AwaitingFall;
        if !timer.wait_until(limit, || gpio::read(echo) == Level::Low).is_ready() {
            warn!("echo fall timed out after {} ticks", limit);
            return EchoOutcome::FallTimeout;
        }

        EchoOutcome::Echo { ticks: timer.read() }
    }
}
