// src/types.rs
//! Core data types shared by the estimators and the generator

use serde::{Deserialize, Serialize};

/// One red/infrared intensity pair captured at a single time step
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PpgSample {
    pub red: f64,
    pub ir: f64,
}

impl PpgSample {
    pub fn new(red: f64, ir: f64) -> Self {
        Self { red, ir }
    }
}

impl From<(f64, f64)> for PpgSample {
    fn from((red, ir): (f64, f64)) -> Self {
        Self { red, ir }
    }
}

/// Point-in-time SpO2 estimate.
///
/// `spo2` is `None` when the window is too short or degenerate. That is a
/// normal outcome during startup or sensor dropout, distinct from a valid
/// reading of `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Saturation percentage in [0, 100]
    pub spo2: Option<f64>,
    /// Heuristic signal quality in [0, 1]
    pub quality: f64,
}

impl Estimate {
    /// No usable estimate; quality is always exactly 0.0
    pub const fn undefined() -> Self {
        Self {
            spo2: None,
            quality: 0.0,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.spo2.is_some()
    }

    /// Coarse quality classification
    pub fn quality_level(&self) -> QualityLevel {
        if self.spo2.is_none() {
            return QualityLevel::Unusable;
        }
        QualityLevel::from_score(self.quality)
    }
}

impl Default for Estimate {
    fn default() -> Self {
        Self::undefined()
    }
}

/// Quality levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityLevel {
    Excellent,
    Good,
    Fair,
    Poor,
    Unusable,
}

impl QualityLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            QualityLevel::Excellent
        } else if score >= 0.5 {
            QualityLevel::Good
        } else if score >= 0.2 {
            QualityLevel::Fair
        } else if score > 0.0 {
            QualityLevel::Poor
        } else {
            QualityLevel::Unusable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_estimate() {
        let estimate = Estimate::undefined();
        assert!(!estimate.is_defined());
        assert_eq!(estimate.quality, 0.0);
        assert_eq!(estimate.quality_level(), QualityLevel::Unusable);
    }

    #[test]
    fn test_zero_spo2_is_not_undefined() {
        let estimate = Estimate {
            spo2: Some(0.0),
            quality: 0.6,
        };
        assert!(estimate.is_defined());
        assert_ne!(estimate, Estimate::undefined());
        assert_eq!(estimate.quality_level(), QualityLevel::Good);
    }

    #[test]
    fn test_quality_levels() {
        assert_eq!(QualityLevel::from_score(1.0), QualityLevel::Excellent);
        assert_eq!(QualityLevel::from_score(0.35), QualityLevel::Fair);
        assert_eq!(QualityLevel::from_score(0.05), QualityLevel::Poor);
        assert_eq!(QualityLevel::from_score(0.0), QualityLevel::Unusable);
    }
}
