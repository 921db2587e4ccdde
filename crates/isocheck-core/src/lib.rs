//! Core raster types and low-level transforms for isometric pixel-art checks.
//!
//! This crate is intentionally small: owned buffers, the binarizer, Sobel
//! gradients and a couple of debug overlays. It performs no I/O; callers hand
//! in already decoded RGBA bytes.

mod binarize;
mod buffer;
mod draw;
mod error;
mod geometry;
mod gradient;
mod logger;

pub use binarize::binarize;
pub use buffer::{luma, BinaryBuffer, LumaImage, PixelBuffer, CHANNELS};
pub use draw::{highlight_segments, outline_box};
pub use error::BufferError;
pub use geometry::{BoundingBox, PixelCoord, Segment, SegmentKind};
pub use gradient::{sobel, GradientField, DEFAULT_EDGE_DISPLAY_THRESHOLD};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_verbosity, init_with_level, verbosity_level};
