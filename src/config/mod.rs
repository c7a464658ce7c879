// src/config/mod.rs
//! Configuration management

pub mod constants;
pub mod loader;

pub use constants::*;
pub use loader::{ConfigError, ConfigLoader};

use crate::processing::Calibration;
use crate::simulation::SimulationConfig;
use crate::utils::validation::{validate_window_size, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Complete system configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct SystemConfig {
    #[serde(default)]
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub driver: DriverConfig,
}

/// Windowed estimator settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EstimatorConfig {
    #[serde(default = "defaults::window_size")]
    pub window_size: usize,

    #[serde(default)]
    pub calibration: Calibration,
}

/// Demonstration driver settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DriverConfig {
    #[serde(default = "defaults::steps")]
    pub steps: u64,

    #[serde(default = "defaults::report_interval")]
    pub report_interval: u64,

    #[serde(default)]
    pub output: OutputFormat,
}

/// Report rendering
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Default value providers using constants
mod defaults {
    use crate::config::constants::*;

    pub fn window_size() -> usize { driver::DEFAULT_WINDOW_SIZE }
    pub fn steps() -> u64 { driver::DEFAULT_STEPS }
    pub fn report_interval() -> u64 { driver::DEFAULT_REPORT_INTERVAL }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            window_size: defaults::window_size(),
            calibration: Calibration::default(),
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            steps: defaults::steps(),
            report_interval: defaults::report_interval(),
            output: OutputFormat::default(),
        }
    }
}

impl SystemConfig {
    /// Parse TOML text and validate
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SystemConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> ValidationResult<()> {
        validate_window_size(self.estimator.window_size)?;
        self.estimator.calibration.validate()?;
        self.simulation.validate()?;

        if self.driver.report_interval == 0 {
            return Err(ValidationError::ConstraintViolation {
                fields: vec!["driver.report_interval".to_string()],
                message: "report interval must be at least one step".to_string(),
            });
        }

        if !self.window_covers_beat() {
            warn!(
                window_size = self.estimator.window_size,
                samples_per_beat = self.simulation.samples_per_beat(),
                "estimator window is shorter than one simulated heartbeat"
            );
        }

        Ok(())
    }

    /// Whether the estimator window spans at least one full simulated beat
    pub fn window_covers_beat(&self) -> bool {
        self.estimator.window_size as f64 >= self.simulation.samples_per_beat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = SystemConfig::default();
        assert_eq!(config.estimator.window_size, driver::DEFAULT_WINDOW_SIZE);
        assert_eq!(config.driver.steps, driver::DEFAULT_STEPS);
        assert_eq!(config.driver.output, OutputFormat::Text);
        assert!(config.validate().is_ok());
        assert!(config.window_covers_beat());
    }

    #[test]
    fn test_config_serialization() {
        let config = SystemConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: SystemConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SystemConfig::from_toml_str(
            r#"
            [estimator]
            window_size = 300

            [driver]
            output = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.estimator.window_size, 300);
        assert_eq!(config.estimator.calibration, Calibration::default());
        assert_eq!(config.driver.output, OutputFormat::Json);
        assert_eq!(config.simulation, SimulationConfig::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SystemConfig::default();
        config.driver.report_interval = 0;
        assert!(config.validate().is_err());

        let mut config = SystemConfig::default();
        config.estimator.window_size = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_window_is_only_a_warning() {
        let mut config = SystemConfig::default();
        config.estimator.window_size = 10;
        assert!(!config.window_covers_beat());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(matches!(
            SystemConfig::from_toml_str("[estimator]\nwindow_size = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SystemConfig::from_toml_str("[estimator]\nwindow_size = 1"),
            Err(ConfigError::Validation(_))
        ));
    }
}
