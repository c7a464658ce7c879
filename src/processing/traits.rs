// src/processing/traits.rs
//! Common interface for SpO2 estimators

use crate::types::{Estimate, PpgSample};

/// A streaming SpO2 estimator fed one red/infrared pair at a time
pub trait OximetryEstimator {
    /// Feed one sample pair
    fn add_sample(&mut self, sample: PpgSample);

    /// Current estimate; never fails, may be undefined
    fn estimate(&self) -> Estimate;

    /// Drop all accumulated history
    fn reset(&mut self);

    /// Number of samples currently influencing the estimate
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
