// src/processing/shared.rs
//! Mutex-guarded estimator handle for multi-threaded callers

use super::traits::OximetryEstimator;
use crate::types::{Estimate, PpgSample};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle; every call holds the lock for its whole duration so
/// `add` and `estimate` never interleave.
pub struct SharedEstimator<E> {
    inner: Arc<Mutex<E>>,
}

impl<E> Clone for SharedEstimator<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: OximetryEstimator> SharedEstimator<E> {
    pub fn new(estimator: E) -> Self {
        Self {
            inner: Arc::new(Mutex::new(estimator)),
        }
    }

    pub fn add(&self, sample: PpgSample) {
        self.inner.lock().add_sample(sample);
    }

    pub fn estimate(&self) -> Estimate {
        self.inner.lock().estimate()
    }

    /// Add a sample and estimate under a single lock
    pub fn add_and_estimate(&self, sample: PpgSample) -> Estimate {
        let mut estimator = self.inner.lock();
        estimator.add_sample(sample);
        estimator.estimate()
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run a closure with exclusive access
    pub fn with<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::SpO2Estimator;
    use std::thread;

    #[test]
    fn test_concurrent_producers() {
        let shared = SharedEstimator::new(SpO2Estimator::new(50).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let handle = shared.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        let offset = ((worker * 100 + i) % 7) as f64;
                        handle.add(PpgSample::new(100.0 + offset, 100.0 + offset * 2.0));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.len(), 50);
        let estimate = shared.estimate();
        assert!(estimate.is_defined());
        assert!(estimate.quality <= 1.0);
    }

    #[test]
    fn test_add_and_estimate() {
        let shared = SharedEstimator::new(SpO2Estimator::new(3).unwrap());
        assert!(!shared.add_and_estimate(PpgSample::new(98.0, 95.0)).is_defined());
        shared.add(PpgSample::new(100.0, 100.0));
        let estimate = shared.add_and_estimate(PpgSample::new(102.0, 105.0));
        assert!((estimate.spo2.unwrap() - 100.0).abs() < 1e-9);

        shared.reset();
        assert!(shared.is_empty());
        assert_eq!(shared.with(|e| e.window_size()), 3);
    }
}
