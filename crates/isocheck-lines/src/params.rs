use serde::{Deserialize, Serialize};

/// Line extraction settings shared by the orthogonal and isometric passes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineParams {
    /// Shortest run (in pixels) that is reported as a segment.
    pub min_length: usize,
}

impl Default for LineParams {
    fn default() -> Self {
        Self { min_length: 4 }
    }
}

/// Spatial grid used by the center-weighted scorer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    pub cols: usize,
    pub rows: usize,
    /// Exponential falloff of cell weight with normalized taxicab distance
    /// from the grid center. `0` weighs every cell equally.
    pub decay_rate: f32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            cols: 8,
            rows: 8,
            decay_rate: 1.0,
        }
    }
}
