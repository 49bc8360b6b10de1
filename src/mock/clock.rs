//! Simulated time, tick counter and echo sensor pins

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::hal::timer::TickCounter;

#[derive(Debug, Default)]
struct Shared {
    now: Cell<u64>,
    counter_running: Cell<bool>,
    trigger_high_at: Cell<Option<u64>>,
    released_at: Cell<Option<u64>>,
    pulses: RefCell<Vec<u64>>,
}

/// Simulated time shared by a counter and a pair of sensor pins
///
/// Cloning yields another handle to the same time base.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    shared: Rc<Shared>,
}

impl SimClock {
    /// Start at tick 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time
    pub fn now(&self) -> u64 {
        self.shared.now.get()
    }

    /// Move time forward
    pub fn advance(&self, ticks: u64) {
        self.shared.now.set(self.now() + ticks);
    }

    /// 32-bit counter on this clock
    pub fn counter(&self) -> SimCounter {
        self.counter_with_max(u32::MAX)
    }

    /// Counter that wraps after `max`
    pub fn counter_with_max(&self, max: u32) -> SimCounter {
        SimCounter {
            clock: self.clone(),
            max,
            base: self.now(),
            loaded: 0,
        }
    }

    /// Check whether a counter on this clock is started
    pub fn counter_running(&self) -> bool {
        self.shared.counter_running.get()
    }

    /// Trigger pin of a simulated sensor
    pub fn trigger(&self) -> SimTrigger {
        SimTrigger { clock: self.clone() }
    }

    /// Echo pin that answers each trigger pulse according to `profile`
    pub fn echo(&self, profile: EchoProfile) -> SimEcho {
        SimEcho {
            clock: self.clone(),
            profile,
        }
    }

    /// Width of every trigger pulse so far, in ticks
    pub fn trigger_pulses(&self) -> Vec<u64> {
        self.shared.pulses.borrow().clone()
    }
}

/// Counter that advances simulated time by one tick per read
#[derive(Debug)]
pub struct SimCounter {
    clock: SimClock,
    max: u32,
    base: u64,
    loaded: u32,
}

impl TickCounter for SimCounter {
    fn start(&mut self) {
        self.clock.shared.counter_running.set(true);
    }

    fn stop(&mut self) {
        self.clock.shared.counter_running.set(false);
    }

    fn counter(&self) -> u32 {
        let elapsed = self.clock.now() - self.base;
        let modulus = u64::from(self.max) + 1;
        let value = (u64::from(self.loaded) + elapsed) % modulus;
        self.clock.advance(1);
        u32::try_from(value).unwrap_or(u32::MAX)
    }

    fn set_counter(&mut self, ticks: u32) {
        self.base = self.clock.now();
        self.loaded = ticks;
    }

    fn max_count(&self) -> u32 {
        self.max
    }
}

/// Trigger output; records when each pulse ends
#[derive(Debug)]
pub struct SimTrigger {
    clock: SimClock,
}

impl ErrorType for SimTrigger {
    type Error = Infallible;
}

impl OutputPin for SimTrigger {
    fn set_low(&mut self) -> Result<(), Infallible> {
        let shared = &self.clock.shared;
        if let Some(rose) = shared.trigger_high_at.take() {
            let now = shared.now.get();
            shared.released_at.set(Some(now));
            shared.pulses.borrow_mut().push(now - rose);
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let shared = &self.clock.shared;
        if shared.trigger_high_at.get().is_none() {
            shared.trigger_high_at.set(Some(shared.now.get()));
        }
        Ok(())
    }
}

/// Echo response to a trigger pulse, timed from the trigger's falling edge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EchoProfile {
    /// Goes high `delay` ticks after the trigger and stays high for `width`
    Pulse {
        /// Ticks from trigger release to the rising edge
        delay: u64,
        /// Pulse width in ticks
        width: u64,
    },
    /// Never goes high
    Silent,
    /// Goes high after `delay` and never falls
    Stuck {
        /// Ticks from trigger release to the rising edge
        delay: u64,
    },
}

/// Echo input driven by the simulated clock
#[derive(Debug)]
pub struct SimEcho {
    clock: SimClock,
    profile: EchoProfile,
}

impl SimEcho {
    fn level(&self) -> bool {
        let Some(released) = self.clock.shared.released_at.get() else {
            return false;
        };
        let since = self.clock.now() - released;
        match self.profile {
            EchoProfile::Pulse { delay, width } => since >= delay && since < delay + width,
            EchoProfile::Silent => false,
            EchoProfile::Stuck { delay } => since >= delay,
        }
    }
}

impl ErrorType for SimEcho {
    type Error = Infallible;
}

impl InputPin for SimEcho {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.level())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.level())
    }
}
