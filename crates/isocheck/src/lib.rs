//! High-level facade for the `isocheck-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core raster types, the line analysis and the template
//!   matcher
//! - the score aggregator ([`score`])
//! - the end-to-end [`IsoValidator`] pipeline
//! - JSON config and report helpers ([`io`])
//! - (feature `image`) file adapters and debug rendering ([`image_io`])
//!
//! ## Quickstart
//!
//! ```
//! use isocheck::{IsoValidator, PixelBuffer, ValidationParams};
//!
//! let canvas = PixelBuffer::from_fn(32, 32, |x, y| {
//!     if x == y || x + y == 31 {
//!         [0, 0, 0, 255]
//!     } else {
//!         [255, 255, 255, 255]
//!     }
//! });
//! let validator = IsoValidator::new(ValidationParams::default());
//! let result = validator.validate(&canvas, &[]).expect("non-empty canvas");
//! println!("total={:.3} pass={}", result.total(), result.passed());
//! ```
//!
//! ## API map
//! - `isocheck::core`: buffers, binarization, Sobel gradients, geometry.
//! - `isocheck::lines`: orthogonal and isometric segments, coverage, grid score.
//! - `isocheck::template`: binary and correlation matching, IoU suppression.

pub use isocheck_core as core;
pub use isocheck_lines as lines;
pub use isocheck_template as template;

pub use isocheck_core::{BinaryBuffer, BoundingBox, BufferError, PixelBuffer, Segment};

pub mod io;
mod pipeline;
pub mod score;

pub use pipeline::{
    IsoValidator, ValidateError, ValidationParams, ValidationResult, DEFAULT_BINARIZE_THRESHOLD,
};

#[cfg(feature = "image")]
pub mod image_io;
