//! Bounded vibration window
//!
//! Fixed-capacity FIFO of recent vibration readings. Statistics are only
//! meaningful once the window is full; callers gate on [`VibrationWindow::is_full`].

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Number of readings required before statistical evaluation.
pub const WINDOW_CAPACITY: usize = 10;

/// Sliding window of the last [`WINDOW_CAPACITY`] vibration readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VibrationWindow {
    samples: VecDeque<f64>,
}

impl VibrationWindow {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(WINDOW_CAPACITY),
        }
    }

    /// Append a reading, evicting the oldest once at capacity.
    pub fn push(&mut self, vibration: f64) {
        if self.samples.len() == WINDOW_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(vibration);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == WINDOW_CAPACITY
    }

    /// Sample mean. Zero for an empty window.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().mean()
    }

    /// Population standard deviation (ddof = 0). Zero for an empty window.
    pub fn std_dev(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().population_std_dev()
    }
}
