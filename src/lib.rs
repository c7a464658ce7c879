//! SpO2-Core: ratio-of-ratios pulse oximetry from PPG signals
//!
//! This library estimates peripheral blood-oxygen saturation (SpO2) from
//! paired red/infrared photoplethysmography samples. It features:
//!
//! - A sliding-window estimator (mean for DC, half peak-to-peak for AC)
//! - A beat-synchronous streaming estimator
//! - Multi-sensor banks and a mutex-guarded shared handle
//! - A seedable synthetic PPG generator for offline validation
//! - Layered TOML/environment configuration
//!
//! # Quick Start
//!
//! ```rust
//! use spo2_core::processing::SpO2Estimator;
//! use spo2_core::simulation::{PpgSignalGenerator, SimulationConfig};
//!
//! let config = SimulationConfig { seed: Some(7), ..Default::default() };
//! let mut generator = PpgSignalGenerator::new(config)?;
//! let mut estimator = SpO2Estimator::new(200)?;
//!
//! for sample in generator.by_ref().take(400) {
//!     estimator.add(sample.red, sample.ir);
//! }
//!
//! let estimate = estimator.estimate();
//! if let Some(spo2) = estimate.spo2 {
//!     println!("SpO2 {:.1}% (quality {:.2})", spo2, estimate.quality);
//! }
//! # Ok::<(), spo2_core::ValidationError>(())
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod error;
pub mod processing;
pub mod simulation;
pub mod types;
pub mod utils;

// Re-export commonly used types for convenience
pub use error::{Spo2Error, Spo2Result};
pub use processing::{BeatSpO2Estimator, Calibration, OximetryEstimator, SpO2Estimator};
pub use types::{Estimate, PpgSample, QualityLevel};
pub use utils::validation::{ValidationError, ValidationResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
