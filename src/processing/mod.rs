// src/processing/mod.rs
//! SpO2 estimation from red/infrared PPG samples

pub mod bank;
pub mod beat;
pub mod estimator;
pub mod shared;
pub mod traits;
pub mod window;

pub use bank::EstimatorBank;
pub use beat::BeatSpO2Estimator;
pub use estimator::{Calibration, SpO2Estimator};
pub use shared::SharedEstimator;
pub use traits::OximetryEstimator;
pub use window::{ChannelStats, SampleWindow};
