//! Synthetic PPG simulation for offline estimator validation
//! Location: src/simulation/mod.rs

pub mod config;
pub mod noise_models;
pub mod runner;
pub mod signal_generator;

pub use config::SimulationConfig;
pub use noise_models::MultiplicativeNoise;
pub use runner::{Report, SimulationRunner};
pub use signal_generator::{
    clean_ppg, expected_ratio, expected_spo2, red_pulse_scale, synth_ppg, PpgSignalGenerator,
};
