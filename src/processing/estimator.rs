// src/processing/estimator.rs
//! Windowed ratio-of-ratios SpO2 estimator
//!
//! DC is approximated by the window mean and AC by half the peak-to-peak
//! range of each channel. This is a coarse envelope estimate, not a bandpass
//! filter, so outliers and baseline drift inside the window both bias it.

use super::traits::OximetryEstimator;
use super::window::{ChannelStats, SampleWindow};
use crate::config::constants::estimator;
use crate::types::{Estimate, PpgSample};
use crate::utils::validation::{
    validate_positive, validate_range_f64, validate_window_size, ValidationResult,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Linear R -> SpO2 calibration plus the quality heuristic gain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    #[serde(default = "defaults::intercept")]
    pub intercept: f64,
    #[serde(default = "defaults::slope")]
    pub slope: f64,
    #[serde(default = "defaults::quality_gain")]
    pub quality_gain: f64,
}

mod defaults {
    use crate::config::constants::estimator;

    pub fn intercept() -> f64 { estimator::CALIBRATION_INTERCEPT }
    pub fn slope() -> f64 { estimator::CALIBRATION_SLOPE }
    pub fn quality_gain() -> f64 { estimator::QUALITY_GAIN }
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            intercept: defaults::intercept(),
            slope: defaults::slope(),
            quality_gain: defaults::quality_gain(),
        }
    }
}

impl Calibration {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_range_f64("calibration.intercept", self.intercept, f64::MIN, f64::MAX)?;
        validate_range_f64("calibration.slope", self.slope, f64::MIN, f64::MAX)?;
        validate_positive("calibration.quality_gain", self.quality_gain)
    }

    /// Map a ratio-of-ratios onto SpO2, clamped to [0, 100].
    ///
    /// A NaN ratio (overflowed or subnormal window sums) saturates at 100.
    pub fn spo2(&self, ratio: f64) -> f64 {
        bounded(self.intercept - self.slope * ratio, estimator::SPO2_MIN, estimator::SPO2_MAX)
    }

    /// Quality from the red and infrared AC/DC modulation, capped at 1.0
    pub fn quality(&self, red_modulation: f64, ir_modulation: f64) -> f64 {
        bounded(
            (ir_modulation + red_modulation) * self.quality_gain,
            0.0,
            estimator::QUALITY_MAX,
        )
    }

    /// Full estimate from per-channel window statistics.
    ///
    /// Returns undefined when either mean is non-positive or the infrared
    /// channel has no pulsatile range.
    pub fn evaluate(&self, red: &ChannelStats, ir: &ChannelStats) -> Estimate {
        if red.mean <= 0.0 || ir.mean <= 0.0 || ir.ac() <= 0.0 {
            trace!(
                mean_r = red.mean,
                mean_i = ir.mean,
                ac_i = ir.ac(),
                "degenerate window"
            );
            return Estimate::undefined();
        }

        let red_modulation = red.modulation();
        let ir_modulation = ir.modulation();
        let ratio = red_modulation / ir_modulation;

        Estimate {
            spo2: Some(self.spo2(ratio)),
            quality: self.quality(red_modulation, ir_modulation),
        }
    }
}

/// `min` then `max`, so NaN lands on `max_value` instead of propagating
/// the way `f64::clamp` does
fn bounded(value: f64, min_value: f64, max_value: f64) -> f64 {
    value.min(max_value).max(min_value)
}

/// Sliding-window SpO2 estimator
#[derive(Debug, Clone)]
pub struct SpO2Estimator {
    window: SampleWindow,
    calibration: Calibration,
}

impl Default for SpO2Estimator {
    fn default() -> Self {
        Self {
            window: SampleWindow::new(estimator::DEFAULT_WINDOW_SIZE),
            calibration: Calibration::default(),
        }
    }
}

impl SpO2Estimator {
    /// Create an estimator with the default calibration.
    ///
    /// `window_size` must be at least 3.
    pub fn new(window_size: usize) -> ValidationResult<Self> {
        Self::with_calibration(window_size, Calibration::default())
    }

    pub fn with_calibration(
        window_size: usize,
        calibration: Calibration,
    ) -> ValidationResult<Self> {
        validate_window_size(window_size)?;
        calibration.validate()?;
        Ok(Self {
            window: SampleWindow::new(window_size),
            calibration,
        })
    }

    /// Append one red/infrared pair, evicting the oldest pair when full
    pub fn add(&mut self, red: f64, ir: f64) {
        self.window.push(PpgSample::new(red, ir));
    }

    pub fn estimate(&self) -> Estimate {
        if self.window.len() < estimator::MIN_WINDOW_SIZE {
            return Estimate::undefined();
        }
        match self.window.stats() {
            Some((red, ir)) => self.calibration.evaluate(&red, &ir),
            None => Estimate::undefined(),
        }
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    pub fn window_size(&self) -> usize {
        self.window.capacity()
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }
}

impl OximetryEstimator for SpO2Estimator {
    fn add_sample(&mut self, sample: PpgSample) {
        self.window.push(sample);
    }

    fn estimate(&self) -> Estimate {
        SpO2Estimator::estimate(self)
    }

    fn reset(&mut self) {
        self.window.clear();
    }

    fn len(&self) -> usize {
        self.window.len()
    }
}
