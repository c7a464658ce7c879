//! Synthetic PPG waveform generation
//! Location: src/simulation/signal_generator.rs
//!
//! Both channels sit on a fixed baseline. Infrared carries a fundamental at
//! the heart rate plus a smaller second harmonic that approximates the
//! dicrotic notch; red carries only the fundamental, scaled down as the
//! target saturation drops. That amplitude ratio is how a target SpO2 is
//! encoded into the waveform's ratio-of-ratios.

use super::config::SimulationConfig;
use super::noise_models::{draw_factor, MultiplicativeNoise};
use crate::config::constants::simulation;
use crate::processing::Calibration;
use crate::types::PpgSample;
use crate::utils::validation::ValidationResult;
use rand::Rng;
use std::f64::consts::PI;

/// Red fundamental gain relative to infrared for a target saturation
pub fn red_pulse_scale(target_spo2: f64) -> f64 {
    1.0 - (100.0 - target_spo2) / 100.0 * simulation::RED_DESATURATION_FACTOR
}

/// Noiseless red/infrared pair at time `t` seconds
pub fn clean_ppg(t: f64, hr_bpm: f64, target_spo2: f64) -> PpgSample {
    let hr_hz = hr_bpm / 60.0;
    let base = simulation::BASELINE_INTENSITY;
    let ac = simulation::FUNDAMENTAL_FRACTION * base;
    let fundamental = (2.0 * PI * hr_hz * t).sin();

    let ir = base
        + ac * fundamental
        + simulation::HARMONIC_FRACTION * base * (2.0 * PI * 2.0 * hr_hz * t).sin();
    let red = base + ac * red_pulse_scale(target_spo2) * fundamental;

    PpgSample { red, ir }
}

/// One red/infrared pair with independent multiplicative noise per channel.
///
/// With `noise == 0.0` the output depends only on `t`, `hr_bpm` and
/// `target_spo2` and the random source is left untouched.
pub fn synth_ppg<R: Rng + ?Sized>(
    rng: &mut R,
    t: f64,
    hr_bpm: f64,
    target_spo2: f64,
    noise: f64,
) -> PpgSample {
    let clean = clean_ppg(t, hr_bpm, target_spo2);
    let ir = clean.ir * draw_factor(rng, noise);
    let red = clean.red * draw_factor(rng, noise);
    PpgSample { red, ir }
}

/// Peak of `sin x + k sin 2x` for a harmonic ratio `k >= 0`
fn harmonic_peak(k: f64) -> f64 {
    if k <= 0.0 {
        return 1.0;
    }
    // Stationary point: cos x + 2k cos 2x = 0, quadratic in cos x
    let c = (-1.0 + (1.0 + 32.0 * k * k).sqrt()) / (8.0 * k);
    let s = (1.0 - c * c).sqrt();
    s * (1.0 + 2.0 * k * c)
}

/// Ratio-of-ratios the noiseless waveform yields under the windowed
/// estimator once the window spans at least one full beat.
pub fn expected_ratio(target_spo2: f64) -> f64 {
    let k = simulation::HARMONIC_FRACTION / simulation::FUNDAMENTAL_FRACTION;
    red_pulse_scale(target_spo2) / harmonic_peak(k)
}

/// SpO2 the windowed estimator should report for a noiseless waveform
pub fn expected_spo2(target_spo2: f64, calibration: &Calibration) -> f64 {
    calibration.spo2(expected_ratio(target_spo2))
}

/// Stateful generator stepping through time at a fixed sample rate
pub struct PpgSignalGenerator {
    config: SimulationConfig,
    noise: MultiplicativeNoise,
    sample_index: u64,
}

impl PpgSignalGenerator {
    pub fn new(config: SimulationConfig) -> ValidationResult<Self> {
        config.validate()?;
        Ok(Self {
            noise: MultiplicativeNoise::new(config.noise_level, config.seed),
            config,
            sample_index: 0,
        })
    }

    /// Sample at the current step, then advance one sample interval
    pub fn next_sample(&mut self) -> PpgSample {
        let t = self.current_time();
        self.sample_index += 1;
        self.sample_at(t)
    }

    /// Sample at an arbitrary time without advancing the step counter.
    ///
    /// Draws the infrared factor before the red one, as `synth_ppg` does.
    pub fn sample_at(&mut self, t: f64) -> PpgSample {
        let clean = clean_ppg(t, self.config.heart_rate_bpm, self.config.target_spo2);
        let ir = self.noise.apply(clean.ir);
        let red = self.noise.apply(clean.red);
        PpgSample { red, ir }
    }

    /// Time in seconds of the next sample
    pub fn current_time(&self) -> f64 {
        self.sample_index as f64 * self.config.sample_interval()
    }

    pub fn sample_index(&self) -> u64 {
        self.sample_index
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Change the simulated saturation mid-run
    pub fn set_target_spo2(&mut self, target_spo2: f64) -> ValidationResult<()> {
        crate::utils::validation::validate_spo2(target_spo2)?;
        self.config.target_spo2 = target_spo2;
        Ok(())
    }

    /// Change the simulated heart rate mid-run
    pub fn set_heart_rate(&mut self, hr_bpm: f64) -> ValidationResult<()> {
        crate::utils::validation::validate_heart_rate(hr_bpm)?;
        self.config.heart_rate_bpm = hr_bpm;
        Ok(())
    }
}

impl Iterator for PpgSignalGenerator {
    type Item = PpgSample;

    fn next(&mut self) -> Option<PpgSample> {
        Some(self.next_sample())
    }
}
