// src/config/loader.rs
//! Layered configuration loading: defaults, then a TOML file, then environment

use crate::config::{constants::paths, SystemConfig};
use crate::utils::validation::ValidationError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
    #[error("Configuration parse error: {0}")]
    Parse(String),
    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<::config::ConfigError> for ConfigError {
    fn from(err: ::config::ConfigError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Defaults plus `SPO2_*` environment overrides
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: paths::ENV_PREFIX.to_string(),
        }
    }

    /// Also read a TOML file; a missing file is an error
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Look for the default file name in the working directory
    pub fn discover() -> Self {
        let candidate = PathBuf::from(paths::CONFIG_FILE_NAME);
        let loader = Self::new();
        if candidate.is_file() {
            debug!(path = %candidate.display(), "found configuration file");
            loader.with_file(candidate)
        } else {
            loader
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Merge all sources and validate.
    ///
    /// Environment keys use `_` after the prefix and `__` between nesting
    /// levels, e.g. `SPO2_ESTIMATOR__WINDOW_SIZE=300`.
    pub fn load(&self) -> Result<SystemConfig, ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = &self.config_path {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            builder = builder.add_source(
                ::config::File::from(path.as_path()).format(::config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator(paths::ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config: SystemConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        info!(
            source = self
                .config_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "defaults".to_string()),
            window_size = config.estimator.window_size,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Validate a file without applying environment overrides
    pub fn validate_config_file<P: AsRef<Path>>(path: P) -> Result<SystemConfig, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        SystemConfig::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file() {
        let loader = ConfigLoader::new().with_file("/nonexistent/spo2.toml");
        assert!(matches!(loader.load(), Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_validate_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nheart_rate_bpm = 60.0").unwrap();

        let config = ConfigLoader::validate_config_file(file.path()).unwrap();
        assert_eq!(config.simulation.heart_rate_bpm, 60.0);
    }

    #[test]
    fn test_validate_config_file_io_error() {
        assert!(matches!(
            ConfigLoader::validate_config_file("/nonexistent/spo2.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
