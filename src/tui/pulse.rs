use std::time::{Duration, Instant};

use crate::sequencer::StepRenderer;
use crate::shared::NUMBER_OF_PADS;

// Two 0.3s swings of the highlight, then the column goes back to normal
pub const PULSE_DURATION: Duration = Duration::from_millis(600);

// The renderer side of the sequencer: remembers when each step column was
// last hit. Pulses expire on their own, whatever the transport is doing.
#[derive(Clone, Debug, Default)]
pub struct PulseTracker {
    started: [Option<Instant>; NUMBER_OF_PADS],
}

impl PulseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulse_at(&mut self, step: usize, at: Instant) {
        if let Some(slot) = self.started.get_mut(step) {
            *slot = Some(at); // re-pulsing restarts the animation
        }
    }

    pub fn is_lit(&self, step: usize, now: Instant) -> bool {
        match self.started.get(step).copied().flatten() {
            Some(at) => now.saturating_duration_since(at) < PULSE_DURATION,
            None => false,
        }
    }

    pub fn lit(&self, now: Instant) -> [bool; NUMBER_OF_PADS] {
        std::array::from_fn(|step| self.is_lit(step, now))
    }
}

impl StepRenderer for PulseTracker {
    fn pulse(&mut self, step: usize) {
        self.pulse_at(step, Instant::now());
    }
}
