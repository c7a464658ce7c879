// tests/config_tests.rs
//! Layered configuration loading: file, environment and validation

use serial_test::serial;
use spo2_core::config::{ConfigError, ConfigLoader, OutputFormat};
use std::io::Write;
use tempfile::NamedTempFile;

const PREFIX: &str = "SPO2TEST";

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn clear_env() {
    for key in [
        "SPO2TEST_ESTIMATOR__WINDOW_SIZE",
        "SPO2TEST_DRIVER__OUTPUT",
        "SPO2TEST_SIMULATION__NOISE_LEVEL",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_sources() {
    clear_env();
    let config = ConfigLoader::new().with_env_prefix(PREFIX).load().unwrap();
    assert_eq!(config.estimator.window_size, 200);
    assert_eq!(config.driver.steps, 2000);
    assert_eq!(config.driver.report_interval, 50);
    assert_eq!(config.simulation.sample_rate_hz, 100.0);
}

#[test]
#[serial]
fn test_file_values_are_applied() {
    clear_env();
    let file = write_config(
        r#"
        [estimator]
        window_size = 250

        [estimator.calibration]
        intercept = 104.0
        slope = 17.0

        [simulation]
        target_spo2 = 91.0
        seed = 42
        "#,
    );

    let config = ConfigLoader::new()
        .with_env_prefix(PREFIX)
        .with_file(file.path())
        .load()
        .unwrap();

    assert_eq!(config.estimator.window_size, 250);
    assert_eq!(config.estimator.calibration.intercept, 104.0);
    assert_eq!(config.estimator.calibration.quality_gain, 5.0);
    assert_eq!(config.simulation.target_spo2, 91.0);
    assert_eq!(config.simulation.seed, Some(42));
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    let file = write_config("[estimator]\nwindow_size = 250\n");
    std::env::set_var("SPO2TEST_ESTIMATOR__WINDOW_SIZE", "321");
    std::env::set_var("SPO2TEST_DRIVER__OUTPUT", "json");

    let result = ConfigLoader::new()
        .with_env_prefix(PREFIX)
        .with_file(file.path())
        .load();
    clear_env();

    let config = result.unwrap();
    assert_eq!(config.estimator.window_size, 321);
    assert_eq!(config.driver.output, OutputFormat::Json);
}

#[test]
#[serial]
fn test_invalid_environment_value_fails_validation() {
    clear_env();
    std::env::set_var("SPO2TEST_SIMULATION__NOISE_LEVEL", "2.5");
    let result = ConfigLoader::new().with_env_prefix(PREFIX).load();
    clear_env();

    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
#[serial]
fn test_malformed_file_is_a_parse_error() {
    clear_env();
    let file = write_config("[estimator\nwindow_size = ");
    let result = ConfigLoader::new()
        .with_env_prefix(PREFIX)
        .with_file(file.path())
        .load();
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
