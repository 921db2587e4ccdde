//! Unique-pixel coverage of segment sets.

use isocheck_core::{BinaryBuffer, Segment};
use serde::{Deserialize, Serialize};

use crate::LineSet;

/// Number of distinct pixels referenced by `segments`.
///
/// Overlapping segments count each shared pixel once; points outside the
/// `width × height` frame are ignored.
pub fn coverage(segments: &[Segment], width: usize, height: usize) -> usize {
    let mut covered = vec![false; width * height];
    let mut count = 0usize;
    for p in segments.iter().flat_map(|s| s.points.iter()) {
        if p.x >= width || p.y >= height {
            continue;
        }
        let idx = p.y * width + p.x;
        if !covered[idx] {
            covered[idx] = true;
            count += 1;
        }
    }
    count
}

/// Total black pixels, the usual denominator for coverage ratios.
#[inline]
pub fn black_pixel_count(buf: &BinaryBuffer) -> usize {
    buf.count_black()
}

/// Coverage counts for one extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub isometric: usize,
    pub orthogonal: usize,
    pub total_black: usize,
}

impl CoverageSummary {
    pub fn from_lines(lines: &LineSet, buf: &BinaryBuffer) -> Self {
        let (w, h) = (buf.width(), buf.height());
        Self {
            isometric: coverage(&lines.isometric, w, h),
            orthogonal: coverage(&lines.orthogonal, w, h),
            total_black: black_pixel_count(buf),
        }
    }
}
