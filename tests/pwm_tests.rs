//! PWM Output Tests
//!
//! Tests for duty-cycle mapping, clamping and channel lifetime
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test pwm_tests

use std::cell::RefCell;
use std::rc::Rc;

use stm32_periph::channel::{PwmConfig, PwmOutput};
use stm32_periph::hal::CompareOutput;
use stm32_periph::mock::MockPwm;
use stm32_periph::types::{ConfigError, DutyWindow, PhysicalRange};

/// 50 Hz servo timer: 60000 steps per period
const SERVO_PERIOD: u32 = 59_999;

const CH: u8 = 1;

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_new_starts_channel_and_writes_default() {
    let mut pwm = MockPwm::new(SERVO_PERIOD);
    {
        let _servo = PwmOutput::new(&mut pwm, CH, PwmConfig::SG90);
    }
    assert_eq!(pwm.starts(CH), 1);
    assert_eq!(pwm.writes(CH), &[4350]);
}

#[test]
fn test_drop_stops_channel() {
    let mut pwm = MockPwm::new(SERVO_PERIOD);
    {
        let _servo = PwmOutput::new(&mut pwm, CH, PwmConfig::SG90);
    }
    assert!(!pwm.is_enabled(CH));
}

#[test]
fn test_other_channels_untouched() {
    let mut pwm = MockPwm::new(SERVO_PERIOD);
    {
        let _servo = PwmOutput::new(&mut pwm, CH, PwmConfig::SG90);
    }
    assert_eq!(pwm.starts(2), 0);
    assert!(pwm.writes(2).is_empty());
}

// =============================================================================
// Mapping
// =============================================================================

#[test]
fn test_midpoint_compare() {
    let mut servo = PwmOutput::new(MockPwm::new(SERVO_PERIOD), CH, PwmConfig::SG90);
    servo.set(90.0);
    assert_eq!(servo.compare(), 4350);
    assert_eq!(servo.get(), 90);
}

#[test]
fn test_window_edges() {
    let mut servo = PwmOutput::new(MockPwm::new(SERVO_PERIOD), CH, PwmConfig::SG90);
    servo.set(0.0);
    assert_eq!(servo.compare(), 1500);
    servo.set(180.0);
    assert_eq!(servo.compare(), 7200);
}

#[test]
fn test_round_trip_within_one_degree() {
    let mut servo = PwmOutput::new(MockPwm::new(SERVO_PERIOD), CH, PwmConfig::SG90);
    for x in 0..=180 {
        servo.set(x as f32);
        assert!((servo.get() - x).abs() <= 1, "set({x}) read back {}", servo.get());
    }
}

#[test]
fn test_set_monotonic() {
    let servo = PwmOutput::new(MockPwm::new(SERVO_PERIOD), CH, PwmConfig::SG90);
    let mut previous = servo.compare_for(-1.0);
    for step in 0..=400 {
        let value = step as f32 * 0.5 - 10.0;
        let compare = servo.compare_for(value);
        assert!(compare >= previous, "not monotonic at {value}");
        previous = compare;
    }
}

#[test]
fn test_full_window_percent() {
    let config = PwmConfig::new(PhysicalRange::PERCENT, 0, DutyWindow::FULL);
    let mut output = PwmOutput::new(MockPwm::new(999), CH, config);
    output.set(50.0);
    assert_eq!(output.compare(), 500);
    assert_eq!(output.get(), 50);
}

#[test]
fn test_negative_span() {
    let config = PwmConfig::new(PhysicalRange::new(-90, 90), 0, DutyWindow::new(2.5, 12.0));
    let mut output = PwmOutput::new(MockPwm::new(SERVO_PERIOD), CH, config);
    assert_eq!(output.compare(), 4350);
    output.set(-90.0);
    assert_eq!(output.compare(), 1500);
    assert_eq!(output.get(), -90);
}

/// PWM timer also reachable from outside the channel
struct SharedPwm(Rc<RefCell<MockPwm>>);

impl CompareOutput for SharedPwm {
    type Channel = u8;

    fn start(&mut self, channel: u8) {
        self.0.borrow_mut().start(channel);
    }

    fn stop(&mut self, channel: u8) {
        self.0.borrow_mut().stop(channel);
    }

    fn set_compare(&mut self, channel: u8, value: u32) {
        self.0.borrow_mut().set_compare(channel, value);
    }

    fn compare(&mut self, channel: u8) -> u32 {
        self.0.borrow_mut().compare(channel)
    }

    fn resolution(&self) -> u32 {
        self.0.borrow().resolution()
    }
}

#[test]
fn test_get_reads_foreign_compare() {
    let pwm = Rc::new(RefCell::new(MockPwm::new(SERVO_PERIOD)));
    let mut servo = PwmOutput::new(SharedPwm(Rc::clone(&pwm)), CH, PwmConfig::SG90);
    assert_eq!(servo.channel(), CH);

    // 1350 / 5700 of the window is 42.6 degrees
    pwm.borrow_mut().force_compare(CH, 2850);
    assert_eq!(servo.compare(), 2850);
    assert_eq!(servo.get(), 43);

    // Below the window start the inverse is not clamped
    pwm.borrow_mut().force_compare(CH, 0);
    assert_eq!(servo.get(), -47);
}

// =============================================================================
// Clamping
// =============================================================================

#[test]
fn test_below_min_behaves_like_min() {
    let servo = PwmOutput::new(MockPwm::new(SERVO_PERIOD), CH, PwmConfig::SG90);
    for k in [0.5, 1.0, 10.0, 1e6] {
        assert_eq!(servo.compare_for(-k), servo.compare_for(0.0));
    }
}

#[test]
fn test_above_max_behaves_like_max() {
    let servo = PwmOutput::new(MockPwm::new(SERVO_PERIOD), CH, PwmConfig::SG90);
    for k in [0.5, 1.0, 10.0, 1e6] {
        assert_eq!(servo.compare_for(180.0 + k), servo.compare_for(180.0));
    }
}

#[test]
fn test_nan_behaves_like_min() {
    let mut servo = PwmOutput::new(MockPwm::new(SERVO_PERIOD), CH, PwmConfig::SG90);
    servo.set(f32::NAN);
    assert_eq!(servo.compare(), 1500);
}

#[test]
fn test_limits_clamp_without_changing_calibration() {
    let config = PwmConfig::SG90.with_limits(PhysicalRange::new(30, 150));
    let mut servo = PwmOutput::new(MockPwm::new(SERVO_PERIOD), CH, config);

    // Calibration still spans 0..180
    servo.set(90.0);
    assert_eq!(servo.compare(), 4350);

    servo.set(0.0);
    assert_eq!(servo.compare(), servo.compare_for(30.0));
    assert_eq!(servo.get(), 30);

    servo.set(180.0);
    assert_eq!(servo.compare(), servo.compare_for(150.0));
    assert_eq!(servo.get(), 150);
}

// =============================================================================
// Degenerate Configurations
// =============================================================================

#[test]
fn test_degenerate_range() {
    let config = PwmConfig::new(PhysicalRange::new(45, 45), 45, DutyWindow::new(2.5, 12.0));
    let mut output = PwmOutput::new(MockPwm::new(SERVO_PERIOD), CH, config);
    output.set(100.0);
    assert_eq!(output.compare(), 1500);
    assert_eq!(output.get(), 45);
}

#[test]
fn test_degenerate_window() {
    let config = PwmConfig::new(PhysicalRange::new(0, 180), 90, DutyWindow::new(5.0, 5.0));
    let mut output = PwmOutput::new(MockPwm::new(SERVO_PERIOD), CH, config);
    assert_eq!(output.compare(), 3000);
    assert_eq!(output.get(), 0);
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[test]
fn test_default_outside_range() {
    let result = PwmConfig::try_new(PhysicalRange::new(0, 180), 200, DutyWindow::FULL);
    assert_eq!(result, Err(ConfigError::DefaultOutOfRange));
}

#[test]
fn test_limits_outside_span() {
    let result = PwmConfig::SG90.try_with_limits(PhysicalRange::new(0, 181));
    assert_eq!(result, Err(ConfigError::LimitsOutsideSpan));
}

#[test]
fn test_limits_excluding_default() {
    let result = PwmConfig::SG90.try_with_limits(PhysicalRange::new(100, 180));
    assert_eq!(result, Err(ConfigError::DefaultOutOfRange));
}

#[test]
#[should_panic(expected = "the default input must lie inside the input limits")]
fn test_new_panics_on_bad_default() {
    let _ = PwmConfig::new(PhysicalRange::new(0, 10), -1, DutyWindow::FULL);
}
