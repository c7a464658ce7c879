// src/utils/mod.rs
//! Utility functions shared across spo2-core

pub mod validation;

pub use validation::{ValidationError, ValidationResult};
