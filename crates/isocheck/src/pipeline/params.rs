use isocheck_lines::{GridParams, LineParams};
use isocheck_template::TemplateMatchParams;
use serde::{Deserialize, Serialize};

use crate::score::ScoreParams;

/// Default luma cut-off; only near-black ink survives as black.
pub const DEFAULT_BINARIZE_THRESHOLD: f32 = 2.0;

/// Parameters for [`IsoValidator`](super::IsoValidator).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationParams {
    /// Luma at or above which a pixel turns white.
    pub threshold: f32,
    pub lines: LineParams,
    pub grid: GridParams,
    pub matching: TemplateMatchParams,
    pub score: ScoreParams,
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_BINARIZE_THRESHOLD,
            lines: LineParams::default(),
            grid: GridParams::default(),
            matching: TemplateMatchParams::default(),
            score: ScoreParams::default(),
        }
    }
}
