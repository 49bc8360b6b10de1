//! Calibrated PWM output
//!
//! Maps a physical value (e.g. servo degrees) onto the compare register of
//! one timer channel, inside a duty-cycle calibration window.

use crate::config::{SG90_DEFAULT_DEGREES, SG90_DUTY_WINDOW, SG90_RANGE};
use crate::hal::pwm::CompareOutput;
use crate::types::{ConfigError, DutyWindow, PhysicalRange};

use super::linear::LinearMap;

/// Configuration of a PWM output
///
/// `span` is the physical range that maps onto the duty window. `limits`
/// is the sub-range accepted by [`PwmOutput::set`]; it defaults to the
/// whole span and can be narrowed to protect a mechanism without changing
/// the calibration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PwmConfig {
    span: PhysicalRange,
    limits: PhysicalRange,
    default_input: i32,
    window: DutyWindow,
}

impl PwmConfig {
    /// SG90 hobby servo: 0 to 180 degrees over 2.5 % to 12 %, centred
    pub const SG90: Self = Self::new(SG90_RANGE, SG90_DEFAULT_DEGREES, SG90_DUTY_WINDOW);

    /// Create a configuration whose limits equal the span
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DefaultOutOfRange`] if `default_input` lies
    /// outside `span`.
    pub const fn try_new(
        span: PhysicalRange,
        default_input: i32,
        window: DutyWindow,
    ) -> Result<Self, ConfigError> {
        if !span.contains(default_input) {
            return Err(ConfigError::DefaultOutOfRange);
        }
        Ok(Self {
            span,
            limits: span,
            default_input,
            window,
        })
    }

    /// Create a configuration whose limits equal the span
    ///
    /// # Panics
    ///
    /// Panics if `default_input` lies outside `span`.
    #[must_use]
    pub const fn new(span: PhysicalRange, default_input: i32, window: DutyWindow) -> Self {
        match Self::try_new(span, default_input, window) {
            Ok(config) => config,
            Err(e) => e.panic(),
        }
    }

    /// Narrow the accepted input range
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LimitsOutsideSpan`] if `limits` is not inside
    /// the span, or [`ConfigError::DefaultOutOfRange`] if the default input
    /// falls outside `limits`.
    pub const fn try_with_limits(mut self, limits: PhysicalRange) -> Result<Self, ConfigError> {
        if !self.span.contains_range(limits) {
            return Err(ConfigError::LimitsOutsideSpan);
        }
        if !limits.contains(self.default_input) {
            return Err(ConfigError::DefaultOutOfRange);
        }
        self.limits = limits;
        Ok(self)
    }

    /// Narrow the accepted input range
    ///
    /// # Panics
    ///
    /// Panics on the conditions reported by [`try_with_limits`](Self::try_with_limits).
    #[must_use]
    pub const fn with_limits(self, limits: PhysicalRange) -> Self {
        match self.try_with_limits(limits) {
            Ok(config) => config,
            Err(e) => e.panic(),
        }
    }

    /// Physical span mapped onto the duty window
    #[must_use]
    pub const fn span(&self) -> PhysicalRange {
        self.span
    }

    /// Accepted input range
    #[must_use]
    pub const fn limits(&self) -> PhysicalRange {
        self.limits
    }

    /// Value written at construction
    #[must_use]
    pub const fn default_input(&self) -> i32 {
        self.default_input
    }

    /// Duty-cycle calibration window
    #[must_use]
    pub const fn window(&self) -> DutyWindow {
        self.window
    }
}

/// PWM output channel
///
/// Starts the channel and writes the default input on construction; stops
/// the channel on drop.
pub struct PwmOutput<P: CompareOutput> {
    pwm: P,
    channel: P::Channel,
    config: PwmConfig,
    map: LinearMap,
}

impl<P: CompareOutput> PwmOutput<P> {
    /// Take a timer channel, start it and drive it to the default input
    pub fn new(mut pwm: P, channel: P::Channel, config: PwmConfig) -> Self {
        let map = LinearMap::from_window(config.span, config.window, pwm.resolution() as f32);
        pwm.start(channel);
        let mut output = Self {
            pwm,
            channel,
            config,
            map,
        };
        output.set(config.default_input as f32);
        debug!("pwm started, compare {}", output.compare());
        output
    }

    /// Compare value that [`set`](Self::set) writes for `value`
    #[must_use]
    pub fn compare_for(&self, value: f32) -> u32 {
        self.map.to_register(self.config.limits.clamp(value))
    }

    /// Drive the output to a physical value, clamped to the limits
    pub fn set(&mut self, value: f32) {
        let compare = self.compare_for(value);
        self.pwm.set_compare(self.channel, compare);
        trace!("pwm compare {}", compare);
    }

    /// Physical value for the current compare register
    pub fn get(&mut self) -> i32 {
        let compare = self.pwm.compare(self.channel);
        self.map.to_physical(compare as f32) as i32
    }

    /// Raw compare register
    pub fn compare(&mut self) -> u32 {
        self.pwm.compare(self.channel)
    }

    /// Channel configuration
    #[must_use]
    pub fn config(&self) -> &PwmConfig {
        &self.config
    }

    /// Channel selector
    #[must_use]
    pub fn channel(&self) -> P::Channel {
        self.channel
    }
}

impl<P: CompareOutput> Drop for PwmOutput<P> {
    fn drop(&mut self) {
        self.pwm.stop(self.channel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sg90_preset() {
        let config = PwmConfig::SG90;
        assert_eq!(config.span(), PhysicalRange::new(0, 180));
        assert_eq!(config.limits(), config.span());
        assert_eq!(config.default_input(), 90);
    }

    #[test]
    fn default_outside_span() {
        let result = PwmConfig::try_new(PhysicalRange::new(0, 10), 11, DutyWindow::FULL);
        assert_eq!(result, Err(ConfigError::DefaultOutOfRange));
    }

    #[test]
    fn limits_outside_span() {
        let result = PwmConfig::SG90.try_with_limits(PhysicalRange::new(-10, 90));
        assert_eq!(result, Err(ConfigError::LimitsOutsideSpan));
    }

    #[test]
    fn limits_exclude_default() {
        let result = PwmConfig::SG90.try_with_limits(PhysicalRange::new(0, 45));
        assert_eq!(result, Err(ConfigError::DefaultOutOfRange));
    }

    #[test]
    fn narrowed_limits() {
        let config = PwmConfig::SG90.with_limits(PhysicalRange::new(30, 150));
        assert_eq!(config.span(), PhysicalRange::new(0, 180));
        assert_eq!(config.limits(), PhysicalRange::new(30, 150));
    }
}
