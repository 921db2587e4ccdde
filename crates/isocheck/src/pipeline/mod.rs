//! End-to-end validation pipeline.
//!
//! Binarize → extract lines → coverage and grid score → template matching
//! with suppression → sub-scores → verdict.

mod error;
mod params;
mod result;
mod validator;

pub use error::ValidateError;
pub use params::{ValidationParams, DEFAULT_BINARIZE_THRESHOLD};
pub use result::ValidationResult;
pub use validator::IsoValidator;
