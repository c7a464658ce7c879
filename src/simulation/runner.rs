//! Generator-to-estimator driver loop
//! Location: src/simulation/runner.rs

use super::signal_generator::PpgSignalGenerator;
use crate::config::{DriverConfig, OutputFormat, SystemConfig};
use crate::error::Spo2Result;
use crate::processing::{OximetryEstimator, SpO2Estimator};
use serde::Serialize;
use tracing::{debug, info};

/// Periodic snapshot of the estimator during a simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub step: u64,
    /// Elapsed simulated time in seconds
    pub t: f64,
    pub spo2: Option<f64>,
    pub quality: f64,
}

impl Report {
    pub fn to_text(&self) -> String {
        let spo2 = match self.spo2 {
            Some(value) => format!("{:.2}", value),
            None => "n/a".to_string(),
        };
        format!("t={:.2}s spo2={} quality={:.2}", self.t, spo2, self.quality)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => self.to_json(),
        }
    }
}

/// Feeds generated samples into a windowed estimator and yields a
/// [`Report`] every `report_interval` steps, starting at step 0.
pub struct SimulationRunner {
    generator: PpgSignalGenerator,
    estimator: SpO2Estimator,
    driver: DriverConfig,
    step: u64,
}

impl SimulationRunner {
    pub fn new(config: &SystemConfig) -> Spo2Result<Self> {
        config.validate()?;
        let generator = PpgSignalGenerator::new(config.simulation.clone())?;
        let estimator = SpO2Estimator::with_calibration(
            config.estimator.window_size,
            config.estimator.calibration,
        )?;

        info!(
            window_size = config.estimator.window_size,
            steps = config.driver.steps,
            heart_rate_bpm = config.simulation.heart_rate_bpm,
            target_spo2 = config.simulation.target_spo2,
            noise_level = config.simulation.noise_level,
            "simulation configured"
        );

        Ok(Self {
            generator,
            estimator,
            driver: config.driver.clone(),
            step: 0,
        })
    }

    pub fn estimator(&self) -> &SpO2Estimator {
        &self.estimator
    }

    pub fn generator_mut(&mut self) -> &mut PpgSignalGenerator {
        &mut self.generator
    }

    pub fn steps_taken(&self) -> u64 {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.driver.steps
    }

    /// Run to completion, handing each report to `on_report`
    pub fn run_with(&mut self, mut on_report: impl FnMut(&Report)) -> usize {
        let mut count = 0;
        for report in self.by_ref() {
            on_report(&report);
            count += 1;
        }
        info!(steps = self.step, reports = count, "simulation finished");
        count
    }
}

impl Iterator for SimulationRunner {
    type Item = Report;

    fn next(&mut self) -> Option<Report> {
        while self.step < self.driver.steps {
            let step = self.step;
            let t = self.generator.current_time();
            let sample = self.generator.next_sample();
            self.estimator.add_sample(sample);
            self.step += 1;

            if step % self.driver.report_interval == 0 {
                let estimate = self.estimator.estimate();
                debug!(step, t, spo2 = ?estimate.spo2, quality = estimate.quality, "report");
                return Some(Report {
                    step,
                    t,
                    spo2: estimate.spo2,
                    quality: estimate.quality,
                });
            }
        }
        None
    }
}
