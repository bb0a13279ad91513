use std::collections::VecDeque;

use crate::domain::ports::RandomSource;

// Deterministic source: every draw lands at the same relative position inside its range.
pub(crate) struct FixedRandom(f64);

impl FixedRandom {
    pub(crate) fn fraction(fraction: f64) -> Self {
        Self(fraction)
    }
}

impl RandomSource for FixedRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.0
    }
}

// Replays a scripted list of raw values, then falls back to each range's low end.
pub(crate) struct SequenceRandom {
    values: VecDeque<f64>,
}

impl SequenceRandom {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self {
            values: values.into(),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for SequenceRandom {
    fn uniform(&mut self, low: f64, _high: f64) -> f64 {
        self.values.pop_front().unwrap_or(low)
    }
}
