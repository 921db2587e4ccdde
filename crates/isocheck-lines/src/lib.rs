//! Line-structure analysis on binary rasters.
//!
//! ## Quickstart
//!
//! ```
//! use isocheck_core::BinaryBuffer;
//! use isocheck_lines::{extract_lines, CoverageSummary, LineParams};
//!
//! let buf = BinaryBuffer::from_fn(10, 10, |x, y| y == 3 && (2..=7).contains(&x));
//! let lines = extract_lines(&buf, &LineParams::default());
//! assert_eq!(lines.orthogonal.len(), 1);
//!
//! let cov = CoverageSummary::from_lines(&lines, &buf);
//! assert_eq!(cov.orthogonal, 6);
//! ```
//!
//! Passes:
//! 1. Orthogonal: every row left to right, then every column top to bottom.
//! 2. Isometric: one traced pass per step vector in [`ISOMETRIC_DIRECTIONS`].
//! 3. Both stop before blob pixels (see [`is_blob`]) so filled regions are not
//!    mistaken for lines.
//!
//! Coverage collapses the segments to unique pixels; the grid scorer turns
//! their spatial spread into a center-weighted ratio.

mod blob;
mod coverage;
mod error;
mod grid;
mod isometric;
mod orthogonal;
mod params;

pub use blob::is_blob;
pub use coverage::{black_pixel_count, coverage, CoverageSummary};
pub use error::GridError;
pub use grid::{center_weights, grid_score, weighted_pass_ratio, GridCell, GridScore};
pub use isometric::{find_isometric_segments, trace_direction, ISOMETRIC_DIRECTIONS};
pub use orthogonal::{find_horizontal_segments, find_orthogonal_segments, find_vertical_segments};
pub use params::{GridParams, LineParams};

use isocheck_core::{BinaryBuffer, Segment};
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Segments found by one extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSet {
    pub orthogonal: Vec<Segment>,
    pub isometric: Vec<Segment>,
}

/// Run the orthogonal and isometric passes over `buf`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(buf, params), fields(width = buf.width(), height = buf.height()))
)]
pub fn extract_lines(buf: &BinaryBuffer, params: &LineParams) -> LineSet {
    let orthogonal = find_orthogonal_segments(buf, params.min_length);
    let isometric = find_isometric_segments(buf, params.min_length);
    debug!(
        "extracted {} orthogonal / {} isometric segments (min_length={})",
        orthogonal.len(),
        isometric.len(),
        params.min_length
    );
    LineSet {
        orthogonal,
        isometric,
    }
}
