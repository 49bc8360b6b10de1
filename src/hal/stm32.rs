//! embassy-stm32 bindings
//!
//! Implements the HAL contracts on top of the embassy-stm32 drivers so the
//! channels can run on an STM32F4.

use embassy_stm32::adc::{self, Adc, AdcChannel};
use embassy_stm32::dac::{self, DacChannel, Value};
use embassy_stm32::timer::simple_pwm::SimplePwm;
use embassy_stm32::timer::{Channel, GeneralInstance4Channel};
use embassy_time::Instant;

use super::adc::{AnalogConverter, Conversion};
use super::dac::{DacAlignment, DacPeripheral};
use super::pwm::CompareOutput;
use super::timer::TickCounter;

/// One ADC channel sampled with blocking single conversions
///
/// The embassy driver converts synchronously, so `poll_for_conversion`
/// always reports `Ready` and the timeout is never reached.
pub struct EmbassyAdc<'d, T: adc::Instance, C: AdcChannel<T>> {
    adc: Adc<'d, T>,
    channel: C,
    data: u16,
}

impl<'d, T: adc::Instance, C: AdcChannel<T>> EmbassyAdc<'d, T, C> {
    /// Bind a converter to one input pin
    pub fn new(adc: Adc<'d, T>, channel: C) -> Self {
        Self {
            adc,
            channel,
            data: 0,
        }
    }
}

impl<T: adc::Instance, C: AdcChannel<T>> AnalogConverter for EmbassyAdc<'_, T, C> {
    fn start(&mut self) {}

    fn poll_for_conversion(&mut self, _timeout_ms: u32) -> Conversion {
        self.data = self.adc.blocking_read(&mut self.channel);
        Conversion::Ready
    }

    fn stop(&mut self) {}

    fn read_raw(&mut self) -> u32 {
        u32::from(self.data)
    }
}

impl<T: GeneralInstance4Channel> CompareOutput for SimplePwm<'_, T> {
    type Channel = Channel;

    fn start(&mut self, channel: Channel) {
        self.channel(channel).enable();
    }

    fn stop(&mut self, channel: Channel) {
        self.channel(channel).disable();
    }

    fn set_compare(&mut self, channel: Channel, value: u32) {
        let duty = u16::try_from(value).unwrap_or(u16::MAX);
        self.channel(channel).set_duty_cycle(duty);
    }

    fn compare(&mut self, channel: Channel) -> u32 {
        u32::from(self.channel(channel).current_duty_cycle())
    }

    fn resolution(&self) -> u32 {
        u32::from(self.max_duty_cycle())
    }
}

impl<T: dac::Instance, const N: u8> DacPeripheral for DacChannel<'_, T, N> {
    type Channel = ();

    fn start(&mut self, (): ()) {
        self.enable();
    }

    fn stop(&mut self, (): ()) {
        self.disable();
    }

    fn set_value(&mut self, (): (), alignment: DacAlignment, value: u16) {
        let code = alignment.register_code(value);
        let value = match alignment {
            DacAlignment::Bits8Right => Value::Bit8(u8::try_from(code).unwrap_or(u8::MAX)),
            DacAlignment::Bits12Left => Value::Bit12Left(code),
            DacAlignment::Bits12Right => Value::Bit12Right(code),
        };
        self.set(value);
    }
}

/// Microsecond counter backed by the embassy time driver
///
/// Requires the `tick-hz-1_000_000` time base. The value wraps at 32 bits.
#[derive(Debug)]
pub struct InstantCounter {
    epoch: u64,
    running: bool,
}

impl InstantCounter {
    /// Counter starting at zero
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now().as_micros(),
            running: false,
        }
    }

    /// Check whether the counter was started
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for InstantCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TickCounter for InstantCounter {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn counter(&self) -> u32 {
        // Truncation is the counter wrap
        Instant::now().as_micros().wrapping_sub(self.epoch) as u32
    }

    fn set_counter(&mut self, ticks: u32) {
        self.epoch = Instant::now().as_micros().wrapping_sub(u64::from(ticks));
    }
}
