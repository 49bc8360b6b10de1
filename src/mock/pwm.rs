//! Mock PWM timer

use std::collections::HashMap;

use crate::hal::pwm::CompareOutput;

#[derive(Debug, Default, Clone)]
struct ChannelState {
    enabled: bool,
    starts: usize,
    compare: u32,
    writes: Vec<u32>,
}

/// Mock timer with numbered output-compare channels
#[derive(Debug)]
pub struct MockPwm {
    resolution: u32,
    channels: HashMap<u8, ChannelState>,
}

impl MockPwm {
    /// Create a timer with the given auto-reload period
    pub fn new(period: u32) -> Self {
        Self {
            resolution: period + 1,
            channels: HashMap::new(),
        }
    }

    /// Check whether a channel output is enabled
    pub fn is_enabled(&self, channel: u8) -> bool {
        self.channels.get(&channel).is_some_and(|c| c.enabled)
    }

    /// Number of times a channel was started
    pub fn starts(&self, channel: u8) -> usize {
        self.channels.get(&channel).map_or(0, |c| c.starts)
    }

    /// Current compare register of a channel
    pub fn compare_of(&self, channel: u8) -> u32 {
        self.channels.get(&channel).map_or(0, |c| c.compare)
    }

    /// Every compare value written to a channel, in order
    pub fn writes(&self, channel: u8) -> &[u32] {
        self.channels
            .get(&channel)
            .map(|c| c.writes.as_slice())
            .unwrap_or_default()
    }

    /// Set a compare register behind the driver's back
    pub fn force_compare(&mut self, channel: u8, value: u32) {
        self.channels.entry(channel).or_default().compare = value;
    }
}

impl CompareOutput for MockPwm {
    type Channel = u8;

    fn start(&mut self, channel: u8) {
        let state = self.channels.entry(channel).or_default();
        state.enabled = true;
        state.starts += 1;
    }

    fn stop(&mut self, channel: u8) {
        self.channels.entry(channel).or_default().enabled = false;
    }

    fn set_compare(&mut self, channel: u8, value: u32) {
        let state = self.channels.entry(channel).or_default();
        state.compare = value;
        state.writes.push(value);
    }

    fn compare(&mut self, channel: u8) -> u32 {
        self.compare_of(channel)
    }

    fn resolution(&self) -> u32 {
        self.resolution
    }
}
