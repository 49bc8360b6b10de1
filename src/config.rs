//! System configuration and hardware constants
//!
//! Compile-time defaults for the channels, the echo sensor timing, and the
//! board wiring tables. The channels never read the board tables; they are
//! here for application code and the demo binary.

use crate::types::{DutyWindow, PhysicalRange};

/// Full-scale raw count of a 12-bit ADC
pub const DEFAULT_ADC_RESOLUTION: f32 = 4095.0;

/// Per-conversion poll timeout in milliseconds
pub const DEFAULT_ADC_TIMEOUT_MS: u32 = 5_000;

/// Trigger pulse width for echo sensors in ticks (us)
pub const ECHO_TRIGGER_PULSE_TICKS: u32 = 10;

/// Tick ceiling for each echo edge wait
pub const ECHO_TIMEOUT_TICKS: u32 = 30_000;

/// Distance reported when an echo edge never arrives (cm)
pub const ECHO_OUT_OF_RANGE_CM: u32 = 400;

/// Echo ticks per centimetre (round trip at ~343 m/s, 1 tick = 1 us)
pub const ECHO_TICKS_PER_CM: f32 = 58.0;

/// Guard delay after each measurement so the last echo dies out
pub const ECHO_SETTLE_TICKS: u32 = 100_000;

/// SG90 servo travel in degrees
pub const SG90_RANGE: PhysicalRange = PhysicalRange::new(0, 180);

/// SG90 position written at start-up
pub const SG90_DEFAULT_DEGREES: i32 = 90;

/// SG90 duty window (0.5 ms to 2.4 ms of a 20 ms period)
pub const SG90_DUTY_WINDOW: DutyWindow = DutyWindow::new(2.5, 12.0);

/// Servo PWM frequency
pub const SERVO_PWM_FREQUENCY_HZ: u32 = 50;

/// Tick rate of the microsecond timer
pub const US_TIMER_FREQUENCY_HZ: u32 = 1_000_000;

/// Timer presets
pub mod timers {
    //! Prescaler and period values for the supported boards
    //!
    //! `timer_hz = peripheral_hz / (prescaler + 1)` and
    //! `pwm_hz = timer_hz / (period + 1)`.

    /// Servo timer (TIM2) on STM32F4-Discovery at 168 MHz
    pub mod discovery_f407 {
        /// APB1 timer clock
        pub const PERIPHERAL_CLOCK_HZ: u32 = 84_000_000;
        /// TIM2 prescaler for the servo
        pub const SERVO_PRESCALER: u32 = 27;
        /// TIM2 auto-reload for the servo
        pub const SERVO_PERIOD: u32 = 59_999;
        /// TIM5 prescaler for the microsecond timer
        pub const US_TIMER_PRESCALER: u32 = 83;
        /// TIM5 is 32 bits wide
        pub const US_TIMER_PERIOD: u32 = u32::MAX;
    }

    /// Servo timer (TIM2) on Nucleo-F446RE at 180 MHz
    pub mod nucleo_f446re {
        /// APB1 timer clock
        pub const PERIPHERAL_CLOCK_HZ: u32 = 90_000_000;
        /// TIM2 prescaler for the servo
        pub const SERVO_PRESCALER: u32 = 29;
        /// TIM2 auto-reload for the servo
        pub const SERVO_PERIOD: u32 = 59_999;
        /// TIM1 prescaler for the microsecond timer
        pub const US_TIMER_PRESCALER: u32 = 89;
        /// TIM1 is 16 bits wide
        pub const US_TIMER_PERIOD: u32 = 65_535;
    }
}

/// Pin assignments for GPIO
pub mod pins {
    //! Named pins per board, matching the board user manuals

    /// STM32F4-Discovery (STM32F407VG)
    pub mod discovery_f407 {
        /// Green user LED (LD4)
        pub const LED_GREEN: &str = "PD12";
        /// Orange user LED (LD3)
        pub const LED_ORANGE: &str = "PD13";
        /// Red user LED (LD5)
        pub const LED_RED: &str = "PD14";
        /// Blue user LED (LD6)
        pub const LED_BLUE: &str = "PD15";
        /// User push button (B1)
        pub const USER_BUTTON: &str = "PA0";
    }

    /// Nucleo-F446RE
    pub mod nucleo_f446re {
        /// Green user LED (LD2)
        pub const LED_GREEN: &str = "PA5";
        /// User push button (B1)
        pub const USER_BUTTON: &str = "PC13";
    }

    /// Demo wiring used by the `periph-demo` binary
    pub mod demo {
        /// Servo signal (TIM2 CH1)
        pub const SERVO_PWM: &str = "PA15";
        /// Analog sensor input (ADC1 IN1)
        pub const ANALOG_IN: &str = "PA1";
        /// DAC output (DAC1 OUT1)
        pub const DAC_OUT: &str = "PA4";
        /// HC-SR04 trigger
        pub const ECHO_TRIGGER: &str = "PB0";
        /// HC-SR04 echo (5 V: use a divider or a 5 V tolerant pin)
        pub const ECHO_INPUT: &str = "PB1";
    }
}
