//! Simulation configuration structures
//! Location: src/simulation/config.rs

use crate::utils::validation::{
    validate_heart_rate, validate_noise_level, validate_positive, validate_spo2, ValidationResult,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "defaults::heart_rate_bpm")]
    pub heart_rate_bpm: f64,

    /// Saturation the waveform is shaped to approximate
    #[serde(default = "defaults::target_spo2")]
    pub target_spo2: f64,

    /// Fractional multiplicative noise, e.g. 0.01 for ±1%
    #[serde(default = "defaults::noise_level")]
    pub noise_level: f64,

    #[serde(default = "defaults::sample_rate_hz")]
    pub sample_rate_hz: f64,

    /// Fixed seed for reproducible noise; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

mod defaults {
    use crate::config::constants::simulation;

    pub fn heart_rate_bpm() -> f64 { simulation::DEFAULT_HEART_RATE_BPM }
    pub fn target_spo2() -> f64 { simulation::DEFAULT_TARGET_SPO2 }
    pub fn noise_level() -> f64 { simulation::DEFAULT_NOISE_LEVEL }
    pub fn sample_rate_hz() -> f64 { simulation::DEFAULT_SAMPLE_RATE_HZ }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            heart_rate_bpm: defaults::heart_rate_bpm(),
            target_spo2: defaults::target_spo2(),
            noise_level: defaults::noise_level(),
            sample_rate_hz: defaults::sample_rate_hz(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_heart_rate(self.heart_rate_bpm)?;
        validate_spo2(self.target_spo2)?;
        validate_noise_level(self.noise_level)?;
        validate_positive("sample_rate_hz", self.sample_rate_hz)
    }

    /// Seconds between consecutive samples
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.sample_rate_hz
    }

    /// Samples per simulated heartbeat
    pub fn samples_per_beat(&self) -> f64 {
        self.sample_rate_hz * 60.0 / self.heart_rate_bpm
    }

    /// Noiseless configuration for deterministic runs
    pub fn noiseless(mut self) -> Self {
        self.noise_level = 0.0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::simulation;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.heart_rate_bpm, simulation::DEFAULT_HEART_RATE_BPM);
        assert!((config.sample_interval() - 0.01).abs() < 1e-12);
        assert!((config.samples_per_beat() - 83.333).abs() < 1e-3);
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = SimulationConfig {
            noise_level: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimulationConfig {
            sample_rate_hz: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_noiseless_keeps_other_fields() {
        let config = SimulationConfig {
            target_spo2: 88.0,
            seed: Some(5),
            ..Default::default()
        }
        .noiseless();
        assert_eq!(config.noise_level, 0.0);
        assert_eq!(config.target_spo2, 88.0);
        assert_eq!(config.seed, Some(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config: SimulationConfig = toml::from_str("target_spo2 = 90.0\nseed = 7").unwrap();
        assert_eq!(config.target_spo2, 90.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.noise_level, simulation::DEFAULT_NOISE_LEVEL);
    }
}
