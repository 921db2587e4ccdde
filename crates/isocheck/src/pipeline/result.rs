use isocheck_lines::{CoverageSummary, GridScore, LineSet};
use isocheck_template::MatchSet;
use serde::{Deserialize, Serialize};

use crate::score::{Subscores, Verdict};

/// Output of one validation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub width: usize,
    pub height: usize,
    pub lines: LineSet,
    pub coverage: CoverageSummary,
    pub grid: GridScore,
    /// Deduplicated template hits.
    pub matches: MatchSet,
    pub subscores: Subscores,
    pub verdict: Verdict,
}

impl ValidationResult {
    #[inline]
    pub fn passed(&self) -> bool {
        self.verdict.pass
    }

    #[inline]
    pub fn total(&self) -> f32 {
        self.verdict.total
    }
}
