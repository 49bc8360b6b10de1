//! Calibrated DAC output

use crate::hal::dac::{DacAlignment, DacPeripheral};
use crate::types::{ConfigError, DutyWindow, PhysicalRange};

use super::linear::LinearMap;

/// Configuration of a DAC output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DacConfig {
    range: PhysicalRange,
    alignment: DacAlignment,
    resolution: u16,
}

impl DacConfig {
    /// 12-bit right-aligned output over `range`
    #[must_use]
    pub const fn new(range: PhysicalRange) -> Self {
        Self {
            range,
            alignment: DacAlignment::Bits12Right,
            resolution: DacAlignment::Bits12Right.full_scale(),
        }
    }

    /// Select the data alignment; resets the resolution to its full scale
    #[must_use]
    pub const fn with_alignment(mut self, alignment: DacAlignment) -> Self {
        self.alignment = alignment;
        self.resolution = alignment.full_scale();
        self
    }

    /// Use a smaller full-scale code than the alignment allows
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidResolution`] if `resolution` is zero or
    /// above the alignment's full scale.
    pub const fn try_with_resolution(mut self, resolution: u16) -> Result<Self, ConfigError> {
        if resolution == 0 || resolution > self.alignment.full_scale() {
            return Err(ConfigError::InvalidResolution);
        }
        self.resolution = resolution;
        Ok(self)
    }

    /// Use a smaller full-scale code than the alignment allows
    ///
    /// # Panics
    ///
    /// Panics on the conditions reported by
    /// [`try_with_resolution`](Self::try_with_resolution).
    #[must_use]
    pub const fn with_resolution(self, resolution: u16) -> Self {
        match self.try_with_resolution(resolution) {
            Ok(config) => config,
            Err(e) => e.panic(),
        }
    }

    /// Physical range
    #[must_use]
    pub const fn range(&self) -> PhysicalRange {
        self.range
    }

    /// Data alignment
    #[must_use]
    pub const fn alignment(&self) -> DacAlignment {
        self.alignment
    }

    /// Full-scale output code
    #[must_use]
    pub const fn resolution(&self) -> u16 {
        self.resolution
    }
}

impl Default for DacConfig {
    fn default() -> Self {
        Self::new(PhysicalRange::PERCENT)
    }
}

/// DAC output channel
///
/// The channel is enabled and driven to the range minimum on construction
/// and disabled on drop. The DAC cannot be read back, so [`get`](Self::get)
/// uses the last code written.
pub struct DacOutput<D: DacPeripheral> {
    dac: D,
    channel: D::Channel,
    config: DacConfig,
    map: LinearMap,
    code: u16,
}

impl<D: DacPeripheral> DacOutput<D> {
    /// Take a DAC channel, start it and drive it to the range minimum
    pub fn new(mut dac: D, channel: D::Channel, config: DacConfig) -> Self {
        let resolution = f32::from(config.resolution);
        let map = LinearMap::from_window(config.range, DutyWindow::FULL, resolution);
        dac.start(channel);
        let mut output = Self {
            dac,
            channel,
            config,
            map,
            code: 0,
        };
        output.set(config.range.min() as f32);
        output
    }

    /// Code that [`set`](Self::set) writes for `value`
    #[must_use]
    pub fn code_for(&self, value: f32) -> u16 {
        let code = self.map.to_register(self.config.range.clamp(value));
        code.min(u32::from(self.config.resolution)) as u16
    }

    /// Drive the output to a physical value, clamped to the range
    pub fn set(&mut self, value: f32) {
        let code = self.code_for(value);
        self.dac.set_value(self.channel, self.config.alignment, code);
        self.code = code;
        trace!("dac code {}", code);
    }

    /// Physical value of the last code written
    #[must_use]
    pub fn get(&self) -> i32 {
        self.map.to_physical(f32::from(self.code)) as i32
    }

    /// Last code written
    #[must_use]
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Channel configuration
    #[must_use]
    pub fn config(&self) -> &DacConfig {
        &self.config
    }
}

impl<D: DacPeripheral> Drop for DacOutput<D> {
    fn drop(&mut self) {
        self.dac.stop(self.channel);
    }
}
