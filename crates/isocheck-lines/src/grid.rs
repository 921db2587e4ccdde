//! Center-weighted spatial grid scoring.
//!
//! The buffer is split into `cols × rows` cells of `floor(width / cols) ×
//! floor(height / rows)` pixels; the last row and column absorb the
//! remainder. Every line point bumps its cell's counter, and a cell passes
//! when it holds at least one isometric point. The score is the
//! pass-weighted share of cell weights, where a cell's weight decays
//! exponentially with its normalized taxicab distance from the grid center.

use isocheck_core::Segment;
use serde::{Deserialize, Serialize};

use crate::{GridError, GridParams};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Per-cell point tallies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub isometric_count: usize,
    pub orthogonal_count: usize,
}

impl GridCell {
    #[inline]
    pub fn passes(&self) -> bool {
        self.isometric_count > 0
    }
}

/// Grid tallies plus the weighted pass ratio.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridScore {
    pub cols: usize,
    pub rows: usize,
    pub cell_width: usize,
    pub cell_height: usize,
    /// Indexed `[row][col]`.
    pub cells: Vec<Vec<GridCell>>,
    /// Weighted pass ratio in `[0, 1]`.
    pub score: f32,
}

impl GridScore {
    pub fn passing_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.passes()).count()
    }

    /// Pass flags indexed `[row][col]`.
    pub fn pass_map(&self) -> Vec<Vec<bool>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(GridCell::passes).collect())
            .collect()
    }
}

/// Tally segment points into the grid and compute the weighted pass ratio.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(isometric, orthogonal), fields(cols = params.cols, rows = params.rows))
)]
pub fn grid_score(
    isometric: &[Segment],
    orthogonal: &[Segment],
    width: usize,
    height: usize,
    params: &GridParams,
) -> Result<GridScore, GridError> {
    let GridParams {
        cols,
        rows,
        decay_rate,
    } = *params;
    if cols == 0 || rows == 0 {
        return Err(GridError::InvalidDimensions { cols, rows });
    }
    if width == 0 || height == 0 {
        return Err(GridError::ZeroArea { width, height });
    }
    if cols > width || rows > height {
        return Err(GridError::GridExceedsBuffer {
            cols,
            rows,
            width,
            height,
        });
    }
    if !decay_rate.is_finite() {
        return Err(GridError::InvalidDecayRate { decay_rate });
    }

    let cell_width = width / cols;
    let cell_height = height / rows;
    let mut cells = vec![vec![GridCell::default(); cols]; rows];

    let cell_of = |x: usize, y: usize| ((y / cell_height).min(rows - 1), (x / cell_width).min(cols - 1));
    for p in isometric.iter().flat_map(|s| s.points.iter()) {
        let (r, c) = cell_of(p.x, p.y);
        cells[r][c].isometric_count += 1;
    }
    for p in orthogonal.iter().flat_map(|s| s.points.iter()) {
        let (r, c) = cell_of(p.x, p.y);
        cells[r][c].orthogonal_count += 1;
    }

    let pass: Vec<Vec<bool>> = cells
        .iter()
        .map(|row| row.iter().map(GridCell::passes).collect())
        .collect();
    let score = weighted_pass_ratio(&pass, decay_rate);

    Ok(GridScore {
        cols,
        rows,
        cell_width,
        cell_height,
        cells,
        score,
    })
}

/// Cell weights `exp(-decay_rate · d / d_max)`, indexed `[row][col]`.
///
/// `d` is the taxicab distance from the cell to the grid center
/// `((cols - 1) / 2, (rows - 1) / 2)` and `d_max` the largest such distance.
/// A single-cell grid has weight 1.
pub fn center_weights(cols: usize, rows: usize, decay_rate: f32) -> Vec<Vec<f32>> {
    let cx = (cols.saturating_sub(1)) as f32 / 2.0;
    let cy = (rows.saturating_sub(1)) as f32 / 2.0;
    let max_dist = cx + cy;

    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    let d = (c as f32 - cx).abs() + (r as f32 - cy).abs();
                    let nd = if max_dist > 0.0 { d / max_dist } else { 0.0 };
                    (-decay_rate * nd).exp()
                })
                .collect()
        })
        .collect()
}

/// Weighted share of passing cells in `[0, 1]`; `pass` is indexed `[row][col]`.
pub fn weighted_pass_ratio(pass: &[Vec<bool>], decay_rate: f32) -> f32 {
    let rows = pass.len();
    let cols = pass.first().map_or(0, Vec::len);
    let weights = center_weights(cols, rows, decay_rate);

    let mut passed = 0f32;
    let mut total = 0f32;
    for (flags, ws) in pass.iter().zip(&weights) {
        for (&ok, &w) in flags.iter().zip(ws) {
            total += w;
            if ok {
                passed += w;
            }
        }
    }
    if total <= 0.0 {
        return 0.0;
    }
    (passed / total).clamp(0.0, 1.0)
}
