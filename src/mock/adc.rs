//! Mock ADC

use std::collections::VecDeque;

use crate::hal::adc::{AnalogConverter, Conversion};

/// Mock converter replaying a queue of raw counts
///
/// Each completed conversion loads the next count into the data register;
/// once the queue is empty the last count repeats. A timed-out conversion
/// leaves the data register untouched.
#[derive(Debug, Default)]
pub struct MockAdc {
    queue: VecDeque<u32>,
    data: u32,
    timing_out: bool,
    running: bool,
    starts: usize,
    stops: usize,
    timeouts: Vec<u32>,
}

impl MockAdc {
    /// Create a converter that returns `raws` in order
    pub fn new(raws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            queue: raws.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Converter that always returns `raw`
    pub fn constant(raw: u32) -> Self {
        Self::new([raw])
    }

    /// Make every conversion time out, leaving `stale` in the data register
    #[must_use]
    pub fn timing_out(mut self, stale: u32) -> Self {
        self.timing_out = true;
        self.data = stale;
        self
    }

    /// Number of conversions started
    pub fn starts(&self) -> usize {
        self.starts
    }

    /// Number of stop calls
    pub fn stops(&self) -> usize {
        self.stops
    }

    /// Check whether a conversion is in progress
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Timeouts passed to each poll, in order
    pub fn poll_timeouts(&self) -> &[u32] {
        &self.timeouts
    }
}

impl AnalogConverter for MockAdc {
    fn start(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn poll_for_conversion(&mut self, timeout_ms: u32) -> Conversion {
        self.timeouts.push(timeout_ms);
        if self.timing_out {
            return Conversion::TimedOut;
        }
        if self.queue.len() > 1 {
            self.data = self.queue.pop_front().unwrap_or(self.data);
        } else if let Some(&last) = self.queue.front() {
            self.data = last;
        }
        Conversion::Ready
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }

    fn read_raw(&mut self) -> u32 {
        self.data
    }
}
