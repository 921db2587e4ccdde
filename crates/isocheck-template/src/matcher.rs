//! Strategy selection and the match-then-suppress flow.

use isocheck_core::{binarize, sobel, BinaryBuffer, BoundingBox, BufferError, GradientField, PixelBuffer};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::binary::match_binary_mirrored;
use crate::correlation::{correlate, DEFAULT_WEAK_EDGE_FLOOR};
use crate::nms::{nms, sort_by_score_desc, DEFAULT_IOU_THRESHOLD};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Parameters for tolerant black/white matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryMatchParams {
    /// Pixels allowed to disagree inside a matching window.
    pub allowed_mismatches: usize,
    /// Also match the horizontally flipped template.
    pub mirror: bool,
}

impl Default for BinaryMatchParams {
    fn default() -> Self {
        Self {
            allowed_mismatches: 1,
            mirror: true,
        }
    }
}

/// Parameters for gradient-magnitude correlation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationMatchParams {
    /// Windows scoring below this are discarded before suppression.
    pub min_score: f32,
    /// Template magnitudes at or below this are ignored.
    pub weak_edge_floor: f32,
    pub mirror: bool,
}

impl Default for CorrelationMatchParams {
    fn default() -> Self {
        Self {
            min_score: 0.97,
            weak_edge_floor: DEFAULT_WEAK_EDGE_FLOOR,
            mirror: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchStrategy {
    Binary(BinaryMatchParams),
    Correlation(CorrelationMatchParams),
}

impl Default for MatchStrategy {
    fn default() -> Self {
        MatchStrategy::Binary(BinaryMatchParams::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateMatchParams {
    pub strategy: MatchStrategy,
    pub iou_threshold: f32,
}

impl Default for TemplateMatchParams {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::default(),
            iou_threshold: DEFAULT_IOU_THRESHOLD,
        }
    }
}

/// Matches before and after suppression.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSet {
    /// Windows that passed the strategy's acceptance test, over all templates.
    pub raw_count: usize,
    /// Boxes surviving non-max suppression.
    pub boxes: Vec<BoundingBox>,
}

/// Runs the configured strategy over a set of templates and deduplicates.
#[derive(Clone, Debug, Default)]
pub struct TemplateMatcher {
    params: TemplateMatchParams,
}

impl TemplateMatcher {
    pub fn new(params: TemplateMatchParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TemplateMatchParams {
        &self.params
    }

    /// Prepare `candidate` and `templates` for the configured strategy and match.
    ///
    /// The binary strategy thresholds every buffer with `threshold`; the
    /// correlation strategy runs Sobel on their luma. Empty templates are
    /// skipped.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip_all, fields(templates = templates.len()))
    )]
    pub fn find(
        &self,
        candidate: &PixelBuffer,
        templates: &[PixelBuffer],
        threshold: f32,
    ) -> Result<MatchSet, BufferError> {
        candidate.ensure_non_empty()?;
        let usable: Vec<&PixelBuffer> = templates
            .iter()
            .enumerate()
            .filter_map(|(i, t)| {
                if t.is_empty() {
                    warn!("template {i} is empty; skipped");
                    None
                } else {
                    Some(t)
                }
            })
            .collect();

        match self.params.strategy {
            MatchStrategy::Binary(_) => {
                let cand = binarize(candidate, threshold);
                let tpls: Vec<BinaryBuffer> =
                    usable.iter().map(|t| binarize(t, threshold)).collect();
                Ok(self.find_binary(&cand, &tpls))
            }
            MatchStrategy::Correlation(_) => {
                let cand = sobel(&candidate.to_luma())?;
                let tpls = usable
                    .iter()
                    .map(|t| sobel(&t.to_luma()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.find_correlation(&cand, &tpls))
            }
        }
    }

    /// Binary matching on already thresholded buffers.
    ///
    /// Uses the binary parameters when configured, defaults otherwise.
    pub fn find_binary(&self, candidate: &BinaryBuffer, templates: &[BinaryBuffer]) -> MatchSet {
        let p = match self.params.strategy {
            MatchStrategy::Binary(p) => p,
            MatchStrategy::Correlation(_) => BinaryMatchParams::default(),
        };
        let raw: Vec<BoundingBox> = templates
            .iter()
            .flat_map(|t| match_binary_mirrored(candidate, t, p.allowed_mismatches, p.mirror))
            .collect();
        self.suppress(raw)
    }

    /// Correlation matching on precomputed gradient fields.
    ///
    /// Uses the correlation parameters when configured, defaults otherwise.
    pub fn find_correlation(&self, candidate: &GradientField, templates: &[GradientField]) -> MatchSet {
        let p = match self.params.strategy {
            MatchStrategy::Correlation(p) => p,
            MatchStrategy::Binary(_) => CorrelationMatchParams::default(),
        };
        let mut raw = Vec::new();
        for t in templates {
            raw.extend(correlate(candidate, t, p.weak_edge_floor));
            if p.mirror {
                raw.extend(correlate(candidate, &t.mirrored_horizontal(), p.weak_edge_floor));
            }
        }
        raw.retain(|b| b.score.is_some_and(|s| s >= p.min_score));
        sort_by_score_desc(&mut raw);
        self.suppress(raw)
    }

    fn suppress(&self, raw: Vec<BoundingBox>) -> MatchSet {
        let boxes = nms(&raw, self.params.iou_threshold);
        debug!(
            "template matches: {} raw, {} after nms (iou <= {})",
            raw.len(),
            boxes.len(),
            self.params.iou_threshold
        );
        MatchSet {
            raw_count: raw.len(),
            boxes,
        }
    }
}
