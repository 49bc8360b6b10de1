//! Peripheral Demo Application
//!
//! STM32F4-Discovery demo: a potentiometer steers an SG90 servo, and the
//! HC-SR04 distance is mirrored on the DAC output.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::adc::Adc;
use embassy_stm32::dac::DacCh1;
use embassy_stm32::dma::NoDma;
use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::time::hz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::Channel;
use embassy_time::{Duration, Timer as Delay};
use {defmt_rtt as _, panic_probe as _};

use stm32_periph::hal::stm32::{EmbassyAdc, InstantCounter};
use stm32_periph::prelude::*;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Peripheral demo v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());

    // Potentiometer on PA1 (ADC1_IN1), read as degrees
    let adc = EmbassyAdc::new(Adc::new(p.ADC1), p.PA1);
    let knob_config = AnalogInputConfig::new(SG90_RANGE);
    let mut knob: AnalogInput<_, 5> = AnalogInput::new(adc, knob_config);

    // SG90 on PA15 (TIM2_CH1) at 50 Hz
    let pwm = SimplePwm::new(
        p.TIM2,
        Some(PwmPin::new_ch1(p.PA15, OutputType::PushPull)),
        None,
        None,
        None,
        hz(SERVO_PWM_FREQUENCY_HZ),
        CountingMode::EdgeAlignedUp,
    );
    let mut servo = PwmOutput::new(pwm, Channel::Ch1, PwmConfig::SG90);

    // Distance mirrored on PA4 (DAC_OUT1), full scale at the sentinel
    let dac = DacCh1::new(p.DAC, NoDma, p.PA4);
    let dac_range = PhysicalRange::new(0, ECHO_OUT_OF_RANGE_CM as i32);
    let mut level = DacOutput::new(dac, (), DacConfig::new(dac_range));

    // HC-SR04: trigger PB0, echo PB1
    let trigger = Output::new(p.PB0, Level::Low, Speed::Low);
    let echo = Input::new(p.PB1, Pull::Down);
    let mut sonar = Hcsr04::new(trigger, echo);
    let mut timer = Timer::new(InstantCounter::new());

    info!("Peripherals initialized, servo at {} deg", servo.get());

    loop {
        let angle = knob.sample();
        servo.set(angle);

        let distance = sonar.measure(&mut timer);
        level.set(distance.as_cm() as f32);

        info!("knob {} deg, servo {} deg, distance {}", angle, servo.get(), distance);
        Delay::after(Duration::from_millis(100)).await;
    }
}
