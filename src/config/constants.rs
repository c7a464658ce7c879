// src/config/constants.rs
//! System-wide configuration constants

/// Windowed estimator constants
pub mod estimator {
    /// Smallest window that yields a meaningful AC/DC ratio
    pub const MIN_WINDOW_SIZE: usize = 3;
    pub const DEFAULT_WINDOW_SIZE: usize = 100;
    pub const MAX_WINDOW_SIZE: usize = 1 << 20;

    // Empirical linear R -> SpO2 calibration line
    pub const CALIBRATION_INTERCEPT: f64 = 110.0;
    pub const CALIBRATION_SLOPE: f64 = 25.0;

    // Quality heuristic tuning
    pub const QUALITY_GAIN: f64 = 5.0;
    pub const QUALITY_MAX: f64 = 1.0;

    pub const SPO2_MIN: f64 = 0.0;
    pub const SPO2_MAX: f64 = 100.0;
}

/// Beat-synchronous estimator constants
pub mod beat {
    pub const DEFAULT_LOWPASS_ALPHA: f64 = 0.2;
    pub const DEFAULT_HIGHPASS_ALPHA: f64 = 0.995;
    pub const SPO2_HISTORY_SIZE: usize = 8;

    // Beat detection thresholds on the filtered IR slope
    pub const BEAT_START_SLOPE_FACTOR: f64 = 0.02;
    pub const BEAT_START_SLOPE_EPSILON: f64 = 1e-6;
    pub const BEAT_END_SLOPE: f64 = -0.01;
    pub const MAX_BEAT_SAMPLES: u64 = 200;

    /// DC estimates at or below this are replaced by [`DC_FALLBACK`]
    pub const DC_FLOOR: f64 = 1e-6;
    pub const DC_FALLBACK: f64 = 1.0;
}

/// Synthetic PPG generator constants
pub mod simulation {
    pub const BASELINE_INTENSITY: f64 = 50_000.0;
    /// Fundamental amplitude as a fraction of baseline
    pub const FUNDAMENTAL_FRACTION: f64 = 0.02;
    /// Second-harmonic (dicrotic) amplitude as a fraction of baseline, IR only
    pub const HARMONIC_FRACTION: f64 = 0.005;
    /// Red pulsatile reduction per unit of desaturation
    pub const RED_DESATURATION_FACTOR: f64 = 0.2;

    pub const DEFAULT_HEART_RATE_BPM: f64 = 72.0;
    pub const DEFAULT_TARGET_SPO2: f64 = 96.0;
    pub const DEFAULT_NOISE_LEVEL: f64 = 0.01;
    pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 100.0;

    pub const MIN_HEART_RATE_BPM: f64 = 1.0;
    pub const MAX_HEART_RATE_BPM: f64 = 400.0;
    pub const MAX_NOISE_LEVEL: f64 = 1.0;
}

/// Demonstration driver constants
pub mod driver {
    pub const DEFAULT_WINDOW_SIZE: usize = 200;
    pub const DEFAULT_STEPS: u64 = 2000;
    pub const DEFAULT_REPORT_INTERVAL: u64 = 50;
}

/// Configuration file discovery
pub mod paths {
    pub const CONFIG_FILE_NAME: &str = "spo2.toml";
    pub const ENV_PREFIX: &str = "SPO2";
    pub const ENV_SEPARATOR: &str = "__";
}
