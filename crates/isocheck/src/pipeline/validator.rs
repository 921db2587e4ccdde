use isocheck_core::{binarize, PixelBuffer};
use isocheck_lines::{extract_lines, grid_score, CoverageSummary};
use isocheck_template::TemplateMatcher;
use log::debug;

use super::{ValidateError, ValidationParams, ValidationResult};
use crate::score::{aggregate, Subscores};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Validates candidate regions against a fixed parameter set.
#[derive(Clone, Debug, Default)]
pub struct IsoValidator {
    params: ValidationParams,
    matcher: TemplateMatcher,
}

impl IsoValidator {
    pub fn new(params: ValidationParams) -> Self {
        let matcher = TemplateMatcher::new(params.matching);
        Self { params, matcher }
    }

    #[inline]
    pub fn params(&self) -> &ValidationParams {
        &self.params
    }

    /// Score `candidate` and decide pass/fail.
    ///
    /// `templates` may be empty; the match ratio then depends only on
    /// `expected_matches`. Templates larger than the candidate contribute no
    /// matches.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip_all,
            fields(width = candidate.width(), height = candidate.height(), templates = templates.len())
        )
    )]
    pub fn validate(
        &self,
        candidate: &PixelBuffer,
        templates: &[PixelBuffer],
    ) -> Result<ValidationResult, ValidateError> {
        candidate.ensure_non_empty()?;
        let (width, height) = (candidate.width(), candidate.height());
        let p = &self.params;

        let binary = binarize(candidate, p.threshold);
        let lines = extract_lines(&binary, &p.lines);
        let coverage = CoverageSummary::from_lines(&lines, &binary);
        debug!(
            "coverage: isometric={} orthogonal={} black={}",
            coverage.isometric, coverage.orthogonal, coverage.total_black
        );

        let grid = grid_score(&lines.isometric, &lines.orthogonal, width, height, &p.grid)?;
        let matches = self.matcher.find(candidate, templates, p.threshold)?;

        let subscores = Subscores::compute(&coverage, matches.boxes.len(), grid.score, &p.score);
        let verdict = aggregate(&subscores, &p.score);
        debug!(
            "subscores {:?} -> total={:.3} pass={}",
            subscores, verdict.total, verdict.pass
        );

        Ok(ValidationResult {
            width,
            height,
            lines,
            coverage,
            grid,
            matches,
            subscores,
            verdict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isocheck_core::BufferError;
    use isocheck_lines::{GridError, GridParams};

    const INK: [u8; 4] = [0, 0, 0, 255];
    const PAPER: [u8; 4] = [255, 255, 255, 255];

    #[test]
    fn zero_area_candidate_is_rejected() {
        let err = IsoValidator::default()
            .validate(&PixelBuffer::filled(0, 7, PAPER), &[])
            .unwrap_err();
        assert_eq!(
            err,
            ValidateError::Buffer(BufferError::ZeroArea {
                width: 0,
                height: 7
            })
        );
    }

    #[test]
    fn bad_grid_surfaces_as_grid_error() {
        let params = ValidationParams {
            grid: GridParams {
                cols: 0,
                ..GridParams::default()
            },
            ..ValidationParams::default()
        };
        let err = IsoValidator::new(params)
            .validate(&PixelBuffer::filled(16, 16, PAPER), &[])
            .unwrap_err();
        assert_eq!(
            err,
            ValidateError::Grid(GridError::InvalidDimensions { cols: 0, rows: 8 })
        );
    }

    #[test]
    fn blank_canvas_fails_without_matches() {
        let res = IsoValidator::default()
            .validate(&PixelBuffer::filled(32, 32, PAPER), &[])
            .expect("valid input");
        assert!(res.lines.isometric.is_empty());
        assert_eq!(res.subscores.orthogonal_ratio, 0.0);
        assert_eq!(res.subscores.black_ratio, 0.0);
        assert_eq!(res.subscores.match_ratio, 0.0);
        assert_eq!(res.total(), 0.0);
        assert!(!res.passed());
    }

    #[test]
    fn near_black_counts_as_ink_at_the_default_threshold() {
        // luma of [1, 1, 1] is 1.0 < 2.0
        let dark = PixelBuffer::from_fn(16, 16, |x, y| if x == y { [1, 1, 1, 255] } else { PAPER });
        let res = IsoValidator::default().validate(&dark, &[]).expect("valid input");
        assert_eq!(res.coverage.total_black, 16);
        assert_eq!(res.coverage.isometric, 16);

        let grey = PixelBuffer::from_fn(16, 16, |x, y| if x == y { [3, 3, 3, 255] } else { INK });
        let res = IsoValidator::default().validate(&grey, &[]).expect("valid input");
        assert_eq!(res.coverage.total_black, 16 * 16 - 16);
    }
}
