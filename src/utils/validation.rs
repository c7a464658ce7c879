//! Validation utilities for spo2-core
//!
//! Range checks for configuration parameters. All bounds come from
//! [`crate::config::constants`] so there are no magic numbers at call sites.

use crate::config::constants::{estimator, simulation};
use thiserror::Error;

/// Validation result type
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of valid range
    #[error("Field '{field}' value '{value}' is out of range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },
    /// NaN or infinite value
    #[error("Field '{field}' must be finite, got {value}")]
    NotFinite { field: String, value: f64 },
    /// Cross-field validation failure
    #[error("Constraint violation for fields [{}]: {message}", .fields.join(", "))]
    ConstraintViolation {
        fields: Vec<String>,
        message: String,
    },
}

impl ValidationError {
    fn out_of_range<T: ToString>(field: &str, value: T, min: T, max: T) -> Self {
        ValidationError::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

/// Validate a finite float inside a closed range
pub fn validate_range_f64(field: &str, value: f64, min: f64, max: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
            value,
        });
    }
    if value < min || value > max {
        return Err(ValidationError::out_of_range(field, value, min, max));
    }
    Ok(())
}

/// Validate estimator window size
pub fn validate_window_size(window_size: usize) -> ValidationResult<()> {
    if !(estimator::MIN_WINDOW_SIZE..=estimator::MAX_WINDOW_SIZE).contains(&window_size) {
        return Err(ValidationError::out_of_range(
            "window_size",
            window_size,
            estimator::MIN_WINDOW_SIZE,
            estimator::MAX_WINDOW_SIZE,
        ));
    }
    Ok(())
}

/// Validate simulated heart rate
pub fn validate_heart_rate(hr_bpm: f64) -> ValidationResult<()> {
    validate_range_f64(
        "heart_rate_bpm",
        hr_bpm,
        simulation::MIN_HEART_RATE_BPM,
        simulation::MAX_HEART_RATE_BPM,
    )
}

/// Validate target saturation
pub fn validate_spo2(spo2: f64) -> ValidationResult<()> {
    validate_range_f64("target_spo2", spo2, estimator::SPO2_MIN, estimator::SPO2_MAX)
}

/// Validate multiplicative noise level; must stay below 1.0 so samples remain positive
pub fn validate_noise_level(noise: f64) -> ValidationResult<()> {
    validate_range_f64("noise_level", noise, 0.0, simulation::MAX_NOISE_LEVEL)?;
    if noise >= simulation::MAX_NOISE_LEVEL {
        return Err(ValidationError::out_of_range(
            "noise_level",
            noise,
            0.0,
            simulation::MAX_NOISE_LEVEL,
        ));
    }
    Ok(())
}

/// Validate a strictly positive rate
pub fn validate_positive(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
            value,
        });
    }
    if value <= 0.0 {
        return Err(ValidationError::out_of_range(field, value, f64::MIN_POSITIVE, f64::MAX));
    }
    Ok(())
}

/// Validate a filter coefficient in [0, 1)
pub fn validate_filter_alpha(field: &str, alpha: f64) -> ValidationResult<()> {
    validate_range_f64(field, alpha, 0.0, 1.0)?;
    if alpha >= 1.0 {
        return Err(ValidationError::ConstraintViolation {
            fields: vec![field.to_string()],
            message: "filter coefficient must be below 1.0".to_string(),
        });
    }
    Ok(())
}
