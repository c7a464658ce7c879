// src/processing/bank.rs
//! One estimator per sensor, evaluated in parallel

use super::estimator::{Calibration, SpO2Estimator};
use super::traits::OximetryEstimator;
use crate::error::{Spo2Error, Spo2Result};
use crate::types::{Estimate, PpgSample};
use rayon::prelude::*;

/// Independent estimators for a fixed set of sensors
pub struct EstimatorBank<E> {
    estimators: Vec<E>,
}

impl EstimatorBank<SpO2Estimator> {
    /// Windowed estimators sharing one window size and calibration
    pub fn windowed(
        sensor_count: usize,
        window_size: usize,
        calibration: Calibration,
    ) -> Spo2Result<Self> {
        let estimators = (0..sensor_count)
            .map(|_| SpO2Estimator::with_calibration(window_size, calibration))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { estimators })
    }
}

impl<E> EstimatorBank<E>
where
    E: OximetryEstimator + Send + Sync,
{
    pub fn new(estimators: Vec<E>) -> Self {
        Self { estimators }
    }

    pub fn sensor_count(&self) -> usize {
        self.estimators.len()
    }

    /// Feed one sample per sensor, in sensor order
    pub fn add_frame(&mut self, frame: &[PpgSample]) -> Spo2Result<()> {
        if frame.len() != self.estimators.len() {
            return Err(Spo2Error::FrameSizeMismatch {
                expected: self.estimators.len(),
                actual: frame.len(),
            });
        }
        self.estimators
            .par_iter_mut()
            .zip(frame.par_iter())
            .for_each(|(estimator, &sample)| estimator.add_sample(sample));
        Ok(())
    }

    /// Current estimate of every sensor, in sensor order
    pub fn estimate_all(&self) -> Vec<Estimate> {
        self.estimators.par_iter().map(|e| e.estimate()).collect()
    }

    pub fn get(&self, sensor: usize) -> Option<&E> {
        self.estimators.get(sensor)
    }

    pub fn reset(&mut self) {
        self.estimators.iter_mut().for_each(|e| e.reset());
    }
}
