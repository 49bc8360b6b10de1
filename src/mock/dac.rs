//! Mock DAC

use crate::hal::dac::{DacAlignment, DacPeripheral};

/// Mock single-channel DAC
#[derive(Debug, Default)]
pub struct MockDac {
    enabled: bool,
    starts: usize,
    value: u16,
    alignment: DacAlignment,
    writes: Vec<u16>,
}

impl MockDac {
    /// Create a disabled DAC
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the channel is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of times the channel was started
    pub fn starts(&self) -> usize {
        self.starts
    }

    /// Last code written
    pub fn value(&self) -> u16 {
        self.value
    }

    /// Alignment of the last write
    pub fn alignment(&self) -> DacAlignment {
        self.alignment
    }

    /// Every code written, in order
    pub fn writes(&self) -> &[u16] {
        &self.writes
    }
}

impl DacPeripheral for MockDac {
    type Channel = ();

    fn start(&mut self, (): ()) {
        self.enabled = true;
        self.starts += 1;
    }

    fn stop(&mut self, (): ()) {
        self.enabled = false;
    }

    fn set_value(&mut self, (): (), alignment: DacAlignment, value: u16) {
        self.alignment = alignment;
        self.value = value;
        self.writes.push(value);
    }
}
