//! Sub-score ratios and their reduction to a pass/fail verdict.
//!
//! Every ratio is defined on degenerate inputs instead of producing NaN:
//!
//! | ratio              | formula                          | degenerate case           |
//! |--------------------|----------------------------------|---------------------------|
//! | `orthogonal_ratio` | `min(iso / (ortho · k), 1)`      | zero denominator: 1 if `iso > 0`, else 0 |
//! | `black_ratio`      | `iso / total_black`              | no black pixels: 0        |
//! | `match_ratio`      | `min(matches / expected, 1)`     | `expected == 0`: 1        |

use isocheck_lines::CoverageSummary;
use serde::{Deserialize, Serialize};

/// Totals at or above this pass.
pub const PASS_THRESHOLD: f32 = 0.5;

/// Per-signal scores, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscores {
    pub orthogonal_ratio: f32,
    pub black_ratio: f32,
    pub match_ratio: f32,
    pub grid: f32,
}

impl Subscores {
    pub fn compute(
        coverage: &CoverageSummary,
        matches: usize,
        grid: f32,
        params: &ScoreParams,
    ) -> Self {
        Self {
            orthogonal_ratio: orthogonal_ratio(
                coverage.isometric,
                coverage.orthogonal,
                params.orthogonal_scale,
            ),
            black_ratio: black_ratio(coverage.isometric, coverage.total_black),
            match_ratio: match_ratio(matches, params.expected_matches),
            grid: grid.clamp(0.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub orthogonal_ratio: f32,
    pub black_ratio: f32,
    pub matches: f32,
    /// Reward in additive mode, penalty scale in penalty mode.
    pub grid: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            orthogonal_ratio: 0.3,
            black_ratio: 0.3,
            matches: 0.4,
            grid: 0.0,
        }
    }
}

/// How the grid term enters the total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// `Σ wᵢ·sᵢ`, grid included as a positive term.
    #[default]
    Additive,
    /// `max(0, Σ wᵢ·sᵢ − w_grid · (1 − grid))`.
    Penalty,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreParams {
    pub weights: ScoreWeights,
    pub mode: AggregationMode,
    /// Match count that saturates `match_ratio`.
    pub expected_matches: usize,
    /// `k` in `iso / (ortho · k)`.
    pub orthogonal_scale: f32,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            mode: AggregationMode::Additive,
            expected_matches: 3,
            orthogonal_scale: 0.9,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub total: f32,
    pub pass: bool,
}

pub fn orthogonal_ratio(isometric: usize, orthogonal: usize, scale: f32) -> f32 {
    let denom = orthogonal as f32 * scale;
    if denom <= 0.0 || !denom.is_finite() {
        return if isometric > 0 { 1.0 } else { 0.0 };
    }
    (isometric as f32 / denom).clamp(0.0, 1.0)
}

pub fn black_ratio(isometric: usize, total_black: usize) -> f32 {
    if total_black == 0 {
        return 0.0;
    }
    (isometric as f32 / total_black as f32).clamp(0.0, 1.0)
}

pub fn match_ratio(matches: usize, expected: usize) -> f32 {
    if expected == 0 {
        return 1.0;
    }
    (matches as f32 / expected as f32).min(1.0)
}

/// Weighted total and verdict; `pass` iff `total >= PASS_THRESHOLD`.
pub fn aggregate(scores: &Subscores, params: &ScoreParams) -> Verdict {
    let w = &params.weights;
    let positive = w.orthogonal_ratio * scores.orthogonal_ratio
        + w.black_ratio * scores.black_ratio
        + w.matches * scores.match_ratio;
    let total = match params.mode {
        AggregationMode::Additive => positive + w.grid * scores.grid,
        AggregationMode::Penalty => (positive - w.grid * (1.0 - scores.grid)).max(0.0),
    };
    Verdict {
        total,
        pass: total >= PASS_THRESHOLD,
    }
}
