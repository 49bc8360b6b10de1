//! Affine mapping between a physical range and a register window

#[cfg(feature = "embedded")]
use micromath::F32Ext;

use crate::types::{DutyWindow, PhysicalRange};

/// Affine map between a physical span and a register interval
///
/// `span.min()` corresponds to register value `low` and `span.max()` to
/// `high`. The same map serves the ADC (`low = 0`, `high = resolution`),
/// PWM (calibration window) and DAC (full window).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearMap {
    span: PhysicalRange,
    low: f32,
    high: f32,
}

impl LinearMap {
    /// Create a map from a span and the register values at its edges
    #[must_use]
    pub const fn new(span: PhysicalRange, low: f32, high: f32) -> Self {
        Self { span, low, high }
    }

    /// Map a span onto a duty window of a peripheral with `resolution` steps
    #[must_use]
    pub fn from_window(span: PhysicalRange, window: DutyWindow, resolution: f32) -> Self {
        let (low, high) = window.register_bounds(resolution);
        Self::new(span, low, high)
    }

    /// Physical span
    #[must_use]
    pub const fn span(&self) -> PhysicalRange {
        self.span
    }

    /// Register values at the span edges
    #[must_use]
    pub const fn register_bounds(&self) -> (f32, f32) {
        (self.low, self.high)
    }

    /// Physical value to register value, truncated toward zero
    ///
    /// The caller clamps `value` first. A degenerate span maps everything
    /// to `low`. Negative results saturate to 0.
    #[must_use]
    pub fn to_register(&self, value: f32) -> u32 {
        if self.span.is_degenerate() {
            return self.low as u32;
        }
        let fraction = (value - self.span.min() as f32) / self.span.width();
        (self.low + fraction * (self.high - self.low)) as u32
    }

    /// Register value to physical value, rounded half away from zero
    ///
    /// A zero-width register interval reads back as `span.min()`.
    #[must_use]
    pub fn to_physical(&self, register: f32) -> f32 {
        let width = self.high - self.low;
        if width <= 0.0 {
            return self.span.min() as f32;
        }
        ((register - self.low) / width * self.span.width()).round() + self.span.min() as f32
    }
}
