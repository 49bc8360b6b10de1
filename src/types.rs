//! Shared types used across the peripheral library
//!
//! This module defines the domain types that carry the configuration
//! invariants: physical ranges, duty-cycle calibration windows and
//! distances. Constructors are `const fn`, so a configuration built in a
//! `const` item is checked at compile time.

use core::fmt;

/// Configuration violation
///
/// Returned by the `try_*` constructors. The panicking `const fn`
/// constructors report the same conditions through [`ConfigError::panic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The minimum of a range is greater than its maximum
    InvertedRange,
    /// A duty-cycle percentage is negative (or NaN)
    DutyBelowZero,
    /// A duty-cycle percentage is greater than 100
    DutyAboveFull,
    /// The minimum duty cycle is greater than the maximum duty cycle
    InvertedDutyWindow,
    /// The input limits are not contained in the mapping span
    LimitsOutsideSpan,
    /// The default input lies outside the input limits
    DefaultOutOfRange,
    /// The hardware resolution is not a positive number
    InvalidResolution,
    /// The ticks-per-unit coefficient is not a positive number
    InvalidCoefficient,
    /// A tick ceiling or timeout of zero would never wait
    ZeroTimeout,
}

impl ConfigError {
    /// Human readable description
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvertedRange => "the minimum cannot be greater than the maximum",
            Self::DutyBelowZero => "the duty cycle percentage cannot be negative",
            Self::DutyAboveFull => "the duty cycle percentage cannot be greater than 100",
            Self::InvertedDutyWindow => {
                "the minimum duty cycle cannot be greater than the maximum duty cycle"
            }
            Self::LimitsOutsideSpan => "the input limits must lie inside the input span",
            Self::DefaultOutOfRange => "the default input must lie inside the input limits",
            Self::InvalidResolution => "the hardware resolution must be positive",
            Self::InvalidCoefficient => "the ticks-per-unit coefficient must be positive",
            Self::ZeroTimeout => "the timeout must be at least one tick",
        }
    }

    /// Abort with this error
    ///
    /// In a `const` context this turns into a compile error.
    pub const fn panic(self) -> ! {
        // Literal messages only: const panics cannot format.
        match self {
            Self::InvertedRange => panic!("the minimum cannot be greater than the maximum"),
            Self::DutyBelowZero => panic!("the duty cycle percentage cannot be negative"),
            Self::DutyAboveFull => {
                panic!("the duty cycle percentage cannot be greater than 100")
            }
            Self::InvertedDutyWindow => {
                panic!("the minimum duty cycle cannot be greater than the maximum duty cycle")
            }
            Self::LimitsOutsideSpan => panic!("the input limits must lie inside the input span"),
            Self::DefaultOutOfRange => {
                panic!("the default input must lie inside the input limits")
            }
            Self::InvalidResolution => panic!("the hardware resolution must be positive"),
            Self::InvalidCoefficient => {
                panic!("the ticks-per-unit coefficient must be positive")
            }
            Self::ZeroTimeout => panic!("the timeout must be at least one tick"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ConfigError({=str})", self.message());
    }
}

/// Closed interval `[min, max]` of a physical unit
///
/// Degrees, percent, centimetres or any application unit. The bounds are
/// whole numbers; values mapped into the range are `f32`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicalRange {
    min: i32,
    max: i32,
}

impl PhysicalRange {
    /// 0 to 100, the default range of analog channels
    pub const PERCENT: Self = Self { min: 0, max: 100 };

    /// Create a range, rejecting `min > max`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvertedRange`] if `min > max`.
    pub const fn try_new(min: i32, max: i32) -> Result<Self, ConfigError> {
        if min > max {
            Err(ConfigError::InvertedRange)
        } else {
            Ok(Self { min, max })
        }
    }

    /// Create a range
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        match Self::try_new(min, max) {
            Ok(range) => range,
            Err(e) => e.panic(),
        }
    }

    /// Lower bound
    #[must_use]
    pub const fn min(self) -> i32 {
        self.min
    }

    /// Upper bound
    #[must_use]
    pub const fn max(self) -> i32 {
        self.max
    }

    /// `max - min` as a float (cannot overflow)
    #[must_use]
    pub fn width(self) -> f32 {
        self.max as f32 - self.min as f32
    }

    /// True when `min == max`
    #[must_use]
    pub const fn is_degenerate(self) -> bool {
        self.min == self.max
    }

    /// Check whether a whole value lies inside the range
    #[must_use]
    pub const fn contains(self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check whether another range lies entirely inside this one
    #[must_use]
    pub const fn contains_range(self, other: Self) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    /// Saturate a value into the range
    ///
    /// NaN saturates to the lower bound.
    #[must_use]
    pub fn clamp(self, value: f32) -> f32 {
        let (min, max) = (self.min as f32, self.max as f32);
        if value.is_nan() || value <= min {
            min
        } else if value >= max {
            max
        } else {
            value
        }
    }
}

impl Default for PhysicalRange {
    fn default() -> Self {
        Self::PERCENT
    }
}

impl fmt::Debug for PhysicalRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhysicalRange({}..={})", self.min, self.max)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PhysicalRange {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "[{}, {}]", self.min, self.max);
    }
}

/// Calibration window of a PWM or DAC channel
///
/// The sub-interval `[min%, max%]` of the full duty range that represents
/// the physical range, e.g. 2.5 % to 12 % for a hobby servo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DutyWindow {
    min_percent: f32,
    max_percent: f32,
}

impl DutyWindow {
    /// The whole duty range (0 % to 100 %)
    pub const FULL: Self = Self {
        min_percent: 0.0,
        max_percent: 100.0,
    };

    /// Create a window from two percentages
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DutyBelowZero`], [`ConfigError::DutyAboveFull`]
    /// or [`ConfigError::InvertedDutyWindow`] when the window does not
    /// satisfy `0 <= min <= max <= 100`.
    pub const fn try_new(min_percent: f32, max_percent: f32) -> Result<Self, ConfigError> {
        // Written as negated comparisons so NaN is rejected too
        if !(min_percent >= 0.0) {
            return Err(ConfigError::DutyBelowZero);
        }
        if !(max_percent <= 100.0) {
            return Err(ConfigError::DutyAboveFull);
        }
        if min_percent > max_percent {
            return Err(ConfigError::InvertedDutyWindow);
        }
        Ok(Self {
            min_percent,
            max_percent,
        })
    }

    /// Create a window from two percentages
    ///
    /// # Panics
    ///
    /// Panics unless `0 <= min <= max <= 100`.
    #[must_use]
    pub const fn new(min_percent: f32, max_percent: f32) -> Self {
        match Self::try_new(min_percent, max_percent) {
            Ok(window) => window,
            Err(e) => e.panic(),
        }
    }

    /// Lower duty percentage
    #[must_use]
    pub const fn min_percent(self) -> f32 {
        self.min_percent
    }

    /// Upper duty percentage
    #[must_use]
    pub const fn max_percent(self) -> f32 {
        self.max_percent
    }

    /// Register values at the window edges for a given resolution
    #[must_use]
    pub fn register_bounds(self, resolution: f32) -> (f32, f32) {
        (
            resolution * self.min_percent / 100.0,
            resolution * self.max_percent / 100.0,
        )
    }
}

impl Default for DutyWindow {
    fn default() -> Self {
        Self::FULL
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DutyWindow {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}%..{}%", self.min_percent, self.max_percent);
    }
}

/// Distance reported by an echo-ranging sensor, in whole centimetres
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Distance(u32);

impl Distance {
    /// Create from centimetres
    #[must_use]
    pub const fn from_cm(cm: u32) -> Self {
        Self(cm)
    }

    /// Convert an echo pulse width to a distance (rounded down)
    #[must_use]
    pub fn from_echo_ticks(ticks: u32, ticks_per_cm: f32) -> Self {
        Self((ticks as f32 / ticks_per_cm) as u32)
    }

    /// Distance in centimetres
    #[must_use]
    pub const fn as_cm(self) -> u32 {
        self.0
    }

    /// Distance in millimetres
    #[must_use]
    pub const fn as_mm(self) -> u32 {
        self.0.saturating_mul(10)
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({} cm)", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Distance {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} cm", self.0);
    }
}
