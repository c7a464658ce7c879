// src/processing/window.rs
//! Fixed-capacity paired FIFO history for red/infrared samples

use crate::types::PpgSample;
use std::collections::VecDeque;

/// Per-channel window statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    /// Arithmetic mean (DC component)
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl ChannelStats {
    /// Half the peak-to-peak range (AC component)
    pub fn ac(&self) -> f64 {
        (self.max - self.min) / 2.0
    }

    /// AC/DC modulation ratio
    pub fn modulation(&self) -> f64 {
        self.ac() / self.mean
    }
}

/// Trailing window of sample pairs.
///
/// Red and infrared values are stored together so the two channels can never
/// drift out of step.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<PpgSample>,
    capacity: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a pair, evicting the oldest one when full
    pub fn push(&mut self, sample: PpgSample) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &PpgSample> + '_ {
        self.samples.iter()
    }

    pub fn red_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.red)
    }

    pub fn ir_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.ir)
    }

    /// Statistics for both channels in one pass; `None` when empty
    pub fn stats(&self) -> Option<(ChannelStats, ChannelStats)> {
        let first = self.samples.front()?;
        let mut red = Accumulator::new(first.red);
        let mut ir = Accumulator::new(first.ir);
        for sample in self.samples.iter().skip(1) {
            red.update(sample.red);
            ir.update(sample.ir);
        }
        let n = self.samples.len() as f64;
        Some((red.finish(n), ir.finish(n)))
    }
}

struct Accumulator {
    sum: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    fn new(value: f64) -> Self {
        Self {
            sum: value,
            min: value,
            max: value,
        }
    }

    fn update(&mut self, value: f64) {
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn finish(self, n: f64) -> ChannelStats {
        ChannelStats {
            mean: self.sum / n,
            min: self.min,
            max: self.max,
        }
    }
}
