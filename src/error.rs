// src/error.rs
//! Error types for spo2-core
//!
//! Estimation itself never fails: an unusable window produces an undefined
//! [`Estimate`](crate::types::Estimate). Errors here cover construction,
//! configuration and multi-sensor plumbing.

use crate::config::ConfigError;
use crate::utils::validation::ValidationError;
use thiserror::Error;

/// Result type for fallible spo2-core operations
pub type Spo2Result<T> = Result<T, Spo2Error>;

/// Unified error type
#[derive(Debug, Error)]
pub enum Spo2Error {
    /// A parameter failed range or consistency checks
    #[error("Invalid parameter: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A multi-sensor frame did not carry one sample per sensor
    #[error("Frame size mismatch: expected {expected} samples, got {actual}")]
    FrameSizeMismatch { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_conversion() {
        let err: Spo2Error = ValidationError::NotFinite {
            field: "noise_level".to_string(),
            value: f64::INFINITY,
        }
        .into();
        assert!(matches!(err, Spo2Error::Validation(_)));
        assert!(err.to_string().starts_with("Invalid parameter:"));
    }

    #[test]
    fn test_frame_mismatch_display() {
        let err = Spo2Error::FrameSizeMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Frame size mismatch: expected 4 samples, got 3");
    }
}
