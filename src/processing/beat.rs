// src/processing/beat.rs
//! Beat-synchronous SpO2 estimation
//!
//! Tracks the DC level of each channel with a slow one-pole IIR, low-passes
//! the high-passed residual, and detects beats from the infrared slope. AC is
//! measured per beat as half the filtered peak-to-trough excursion, and the
//! reported SpO2 is the mean of the most recent accepted beats.

use super::estimator::Calibration;
use super::traits::OximetryEstimator;
use crate::config::constants::{beat, estimator};
use crate::types::{Estimate, PpgSample};
use crate::utils::validation::{validate_filter_alpha, ValidationResult};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// One-pole smoother `y = a*y + (1-a)*x`
#[derive(Debug, Clone, Copy)]
struct OnePole {
    alpha: f64,
    state: f64,
}

impl OnePole {
    fn new(alpha: f64) -> Self {
        Self { alpha, state: 0.0 }
    }

    fn update(&mut self, x: f64) -> f64 {
        self.state = self.alpha * self.state + (1.0 - self.alpha) * x;
        self.state
    }
}

/// Peak/trough tracker over the filtered signal of one channel
#[derive(Debug, Clone, Copy, Default)]
struct Excursion {
    peak: f64,
    trough: f64,
}

impl Excursion {
    fn start(value: f64) -> Self {
        Self {
            peak: value,
            trough: value,
        }
    }

    fn update(&mut self, value: f64) {
        self.peak = self.peak.max(value);
        self.trough = self.trough.min(value);
    }

    fn ac(&self) -> f64 {
        (self.peak - self.trough) / 2.0
    }
}

#[derive(Debug, Clone)]
struct Channel {
    dc: OnePole,
    smooth: OnePole,
}

impl Channel {
    fn new(hp_alpha: f64, lp_alpha: f64) -> Self {
        Self {
            dc: OnePole::new(hp_alpha),
            smooth: OnePole::new(lp_alpha),
        }
    }

    fn prime(&mut self, x: f64) {
        self.dc.state = x;
    }

    /// Returns the smoothed high-passed value
    fn process(&mut self, x: f64) -> f64 {
        let dc = self.dc.update(x);
        self.smooth.update(x - dc)
    }

    fn dc(&self) -> f64 {
        if self.dc.state > beat::DC_FLOOR {
            self.dc.state
        } else {
            beat::DC_FALLBACK
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum BeatState {
    Idle,
    InBeat { red: Excursion, ir: Excursion },
}

/// Streaming estimator that measures AC one heartbeat at a time
#[derive(Debug, Clone)]
pub struct BeatSpO2Estimator {
    red: Channel,
    ir: Channel,
    calibration: Calibration,
    primed: bool,
    prev_filtered_ir: f64,
    state: BeatState,
    samples_since_beat: u64,
    samples_seen: usize,
    spo2_history: VecDeque<f64>,
    history_size: usize,
    last_quality: f64,
    beats_detected: u64,
}

impl Default for BeatSpO2Estimator {
    fn default() -> Self {
        Self::new()
    }
}

impl BeatSpO2Estimator {
    pub fn new() -> Self {
        Self::build(Calibration::default())
    }

    pub fn with_calibration(calibration: Calibration) -> ValidationResult<Self> {
        calibration.validate()?;
        Ok(Self::build(calibration))
    }

    fn build(calibration: Calibration) -> Self {
        Self {
            red: Channel::new(beat::DEFAULT_HIGHPASS_ALPHA, beat::DEFAULT_LOWPASS_ALPHA),
            ir: Channel::new(beat::DEFAULT_HIGHPASS_ALPHA, beat::DEFAULT_LOWPASS_ALPHA),
            calibration,
            primed: false,
            prev_filtered_ir: 0.0,
            state: BeatState::Idle,
            samples_since_beat: 0,
            samples_seen: 0,
            spo2_history: VecDeque::with_capacity(beat::SPO2_HISTORY_SIZE),
            history_size: beat::SPO2_HISTORY_SIZE,
            last_quality: 0.0,
            beats_detected: 0,
        }
    }

    /// Low-pass smoothing coefficient in [0, 1); higher is smoother
    pub fn set_lowpass_alpha(&mut self, alpha: f64) -> ValidationResult<()> {
        validate_filter_alpha("lowpass_alpha", alpha)?;
        self.red.smooth.alpha = alpha;
        self.ir.smooth.alpha = alpha;
        Ok(())
    }

    /// DC tracking coefficient in [0, 1); close to 1.0 tracks slowly
    pub fn set_highpass_alpha(&mut self, alpha: f64) -> ValidationResult<()> {
        validate_filter_alpha("highpass_alpha", alpha)?;
        self.red.dc.alpha = alpha;
        self.ir.dc.alpha = alpha;
        Ok(())
    }

    pub fn add(&mut self, red: f64, ir: f64) {
        if !self.primed {
            self.red.prime(red);
            self.ir.prime(ir);
            self.primed = true;
        }
        self.samples_seen += 1;

        let filtered_red = self.red.process(red);
        let filtered_ir = self.ir.process(ir);

        let slope = filtered_ir - self.prev_filtered_ir;
        self.samples_since_beat += 1;

        match self.state {
            BeatState::Idle => {
                let threshold = beat::BEAT_START_SLOPE_FACTOR * self.prev_filtered_ir.abs()
                    + beat::BEAT_START_SLOPE_EPSILON;
                if slope > threshold {
                    self.state = BeatState::InBeat {
                        red: Excursion::start(filtered_red),
                        ir: Excursion::start(filtered_ir),
                    };
                    self.samples_since_beat = 0;
                }
            }
            BeatState::InBeat { mut red, mut ir } => {
                red.update(filtered_red);
                ir.update(filtered_ir);

                if slope < beat::BEAT_END_SLOPE
                    || self.samples_since_beat > beat::MAX_BEAT_SAMPLES
                {
                    self.finish_beat(red.ac(), ir.ac());
                    self.state = BeatState::Idle;
                    self.samples_since_beat = 0;
                } else {
                    self.state = BeatState::InBeat { red, ir };
                }
            }
        }

        self.prev_filtered_ir = filtered_ir;
    }

    fn finish_beat(&mut self, ac_red: f64, ac_ir: f64) {
        self.beats_detected += 1;
        if ac_ir <= 0.0 {
            trace!("beat with flat infrared excursion ignored");
            return;
        }

        let red_modulation = ac_red / self.red.dc();
        let ir_modulation = ac_ir / self.ir.dc();
        let ratio = red_modulation / ir_modulation;
        let spo2 = self.calibration.intercept - self.calibration.slope * ratio;

        if !(estimator::SPO2_MIN..=estimator::SPO2_MAX).contains(&spo2) {
            debug!(ratio, spo2, "beat rejected: saturation out of range");
            return;
        }

        if self.spo2_history.len() >= self.history_size {
            self.spo2_history.pop_front();
        }
        self.spo2_history.push_back(spo2);
        self.last_quality = self.calibration.quality(red_modulation, ir_modulation);
        trace!(ratio, spo2, quality = self.last_quality, "beat accepted");
    }

    /// Mean of recent per-beat values, undefined before the first accepted beat
    pub fn estimate(&self) -> Estimate {
        if self.spo2_history.is_empty() {
            return Estimate::undefined();
        }
        let mean = self.spo2_history.iter().sum::<f64>() / self.spo2_history.len() as f64;
        Estimate {
            spo2: Some(mean),
            quality: self.last_quality,
        }
    }

    /// Quality of the most recent accepted beat
    pub fn quality(&self) -> f64 {
        self.last_quality
    }

    pub fn beats_detected(&self) -> u64 {
        self.beats_detected
    }

    pub fn accepted_beats(&self) -> usize {
        self.spo2_history.len()
    }
}

impl OximetryEstimator for BeatSpO2Estimator {
    fn add_sample(&mut self, sample: PpgSample) {
        self.add(sample.red, sample.ir);
    }

    fn estimate(&self) -> Estimate {
        BeatSpO2Estimator::estimate(self)
    }

    fn reset(&mut self) {
        let (lp, hp) = (self.ir.smooth.alpha, self.ir.dc.alpha);
        *self = Self::build(self.calibration);
        self.red = Channel::new(hp, lp);
        self.ir = Channel::new(hp, lp);
    }

    fn len(&self) -> usize {
        self.samples_seen
    }
}
