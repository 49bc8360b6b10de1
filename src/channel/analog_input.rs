//! Calibrated analog input
//!
//! One ADC channel mapped onto a physical range, with an optional median
//! filter over `N` conversions per sample.

use crate::config::{DEFAULT_ADC_RESOLUTION, DEFAULT_ADC_TIMEOUT_MS};
use crate::hal::adc::AnalogConverter;
use crate::types::{ConfigError, PhysicalRange};

use super::linear::LinearMap;
use super::median::MedianFilter;

/// Configuration of an analog input
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalogInputConfig {
    range: PhysicalRange,
    resolution: f32,
    timeout_ms: u32,
}

impl AnalogInputConfig {
    /// 12-bit conversion onto `range` with the default poll timeout
    #[must_use]
    pub const fn new(range: PhysicalRange) -> Self {
        Self {
            range,
            resolution: DEFAULT_ADC_RESOLUTION,
            timeout_ms: DEFAULT_ADC_TIMEOUT_MS,
        }
    }

    /// Override the full-scale raw count
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidResolution`] unless `resolution > 0`.
    pub const fn try_with_resolution(mut self, resolution: f32) -> Result<Self, ConfigError> {
        if !(resolution > 0.0) {
            return Err(ConfigError::InvalidResolution);
        }
        self.resolution = resolution;
        Ok(self)
    }

    /// Override the full-scale raw count
    ///
    /// # Panics
    ///
    /// Panics unless `resolution > 0`.
    #[must_use]
    pub const fn with_resolution(self, resolution: f32) -> Self {
        match self.try_with_resolution(resolution) {
            Ok(config) => config,
            Err(e) => e.panic(),
        }
    }

    /// Override the per-conversion poll timeout
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Physical range
    #[must_use]
    pub const fn range(&self) -> PhysicalRange {
        self.range
    }

    /// Full-scale raw count
    #[must_use]
    pub const fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Poll timeout per conversion
    #[must_use]
    pub const fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

impl Default for AnalogInputConfig {
    fn default() -> Self {
        Self::new(PhysicalRange::PERCENT)
    }
}

/// Analog input channel
///
/// Each [`sample`](Self::sample) runs `N` conversions and returns their
/// median. `N` must be odd; the default of 1 disables filtering.
pub struct AnalogInput<A: AnalogConverter, const N: usize = 1> {
    adc: A,
    config: AnalogInputConfig,
    map: LinearMap,
}

impl<A: AnalogConverter, const N: usize> AnalogInput<A, N> {
    /// Bind a converter to a configuration
    pub fn new(adc: A, config: AnalogInputConfig) -> Self {
        let () = MedianFilter::<N>::SIZE_CHECK;
        let map = LinearMap::new(config.range, 0.0, config.resolution);
        Self { adc, config, map }
    }

    /// Channel configuration
    #[must_use]
    pub fn config(&self) -> &AnalogInputConfig {
        &self.config
    }

    /// Release the converter
    pub fn release(self) -> A {
        self.adc
    }

    /// Map a raw count to the physical range
    ///
    /// Counts above full scale are clamped to the range maximum.
    #[must_use]
    pub fn to_physical(&self, raw: u32) -> f32 {
        let max = self.config.range.max() as f32;
        self.map.to_physical(raw as f32).min(max)
    }

    /// Run one conversion and map it
    ///
    /// A timed-out conversion still reads the data register, so the value
    /// may be stale.
    pub fn sample_once(&mut self) -> f32 {
        self.adc.start();
        if !self.adc.poll_for_conversion(self.config.timeout_ms).is_ready() {
            warn!("adc conversion timed out after {} ms", self.config.timeout_ms);
        }
        let raw = self.adc.read_raw();
        self.adc.stop();
        trace!("adc raw {}", raw);
        self.to_physical(raw)
    }

    /// Median of `N` conversions
    pub fn sample(&mut self) -> f32 {
        let mut filter = MedianFilter::<N>::new();
        for _ in 0..N {
            filter.push(self.sample_once());
        }
        filter.median().unwrap_or(self.config.range.min() as f32)
    }
}
