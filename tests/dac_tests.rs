//! DAC Output Tests
//!
//! Tests for full-range DAC mapping, alignment and channel lifetime
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test dac_tests

use stm32_periph::channel::{DacConfig, DacOutput};
use stm32_periph::hal::DacAlignment;
use stm32_periph::mock::MockDac;
use stm32_periph::types::PhysicalRange;

// =============================================================================
// Lifetime
// =============================================================================

#[test]
fn test_new_starts_and_writes_min() {
    let mut dac = MockDac::new();
    {
        let output = DacOutput::new(&mut dac, (), DacConfig::default());
        assert_eq!(output.code(), 0);
    }
    assert_eq!(dac.starts(), 1);
    assert_eq!(dac.writes(), &[0]);
}

#[test]
fn test_drop_stops() {
    let mut dac = MockDac::new();
    {
        let mut output = DacOutput::new(&mut dac, (), DacConfig::default());
        output.set(75.0);
    }
    assert!(!dac.is_enabled());
    assert_eq!(dac.writes().len(), 2);
}

// =============================================================================
// Mapping
// =============================================================================

#[test]
fn test_midscale_truncates() {
    // 0.5 * 4095 = 2047.5
    let mut output = DacOutput::new(MockDac::new(), (), DacConfig::default());
    output.set(50.0);
    assert_eq!(output.code(), 2047);
    assert_eq!(output.get(), 50);
}

#[test]
fn test_full_scale() {
    let mut output = DacOutput::new(MockDac::new(), (), DacConfig::default());
    output.set(100.0);
    assert_eq!(output.code(), 4095);
    assert_eq!(output.get(), 100);
}

#[test]
fn test_millivolt_range() {
    let config = DacConfig::new(PhysicalRange::new(0, 3300));
    let mut output = DacOutput::new(MockDac::new(), (), config);
    output.set(1650.0);
    assert_eq!(output.code(), 2047);
    assert_eq!(output.get(), 1650);
}

#[test]
fn test_offset_range_starts_at_min() {
    let config = DacConfig::new(PhysicalRange::new(-50, 50));
    let output = DacOutput::new(MockDac::new(), (), config);
    assert_eq!(output.code(), 0);
    assert_eq!(output.get(), -50);
}

#[test]
fn test_round_trip_within_one_unit() {
    let mut output = DacOutput::new(MockDac::new(), (), DacConfig::default());
    for x in 0..=100 {
        output.set(x as f32);
        assert!((output.get() - x).abs() <= 1, "set({x}) read back {}", output.get());
    }
}

#[test]
fn test_set_monotonic() {
    let output = DacOutput::new(MockDac::new(), (), DacConfig::default());
    let mut previous = output.code_for(-1.0);
    for step in 0..=240 {
        let value = step as f32 * 0.5 - 10.0;
        let code = output.code_for(value);
        assert!(code >= previous, "not monotonic at {value}");
        previous = code;
    }
}

// =============================================================================
// Clamping
// =============================================================================

#[test]
fn test_out_of_range_clamped() {
    let mut output = DacOutput::new(MockDac::new(), (), DacConfig::default());
    output.set(150.0);
    assert_eq!(output.code(), 4095);
    output.set(-5.0);
    assert_eq!(output.code(), 0);
    output.set(f32::NAN);
    assert_eq!(output.code(), 0);
}

// =============================================================================
// Alignment And Resolution
// =============================================================================

#[test]
fn test_default_alignment_written() {
    let mut dac = MockDac::new();
    {
        let _output = DacOutput::new(&mut dac, (), DacConfig::default());
    }
    assert_eq!(dac.alignment(), DacAlignment::Bits12Right);
}

#[test]
fn test_8_bit_alignment() {
    let mut dac = MockDac::new();
    {
        let config = DacConfig::default().with_alignment(DacAlignment::Bits8Right);
        let mut output = DacOutput::new(&mut dac, (), config);
        output.set(100.0);
        assert_eq!(output.get(), 100);
    }
    assert_eq!(dac.value(), 255);
    assert_eq!(dac.alignment(), DacAlignment::Bits8Right);
}

#[test]
fn test_12_bit_left_uses_12_bit_codes() {
    let mut dac = MockDac::new();
    {
        let config = DacConfig::default().with_alignment(DacAlignment::Bits12Left);
        let mut output = DacOutput::new(&mut dac, (), config);
        output.set(100.0);
    }
    assert_eq!(dac.value(), 4095);
    assert_eq!(dac.alignment(), DacAlignment::Bits12Left);
}

#[test]
fn test_resolution_override() {
    let config = DacConfig::default().with_resolution(1000);
    let mut output = DacOutput::new(MockDac::new(), (), config);
    output.set(100.0);
    assert_eq!(output.code(), 1000);
    output.set(25.0);
    assert_eq!(output.code(), 250);
}
