//! Sliding-window template matching with IoU deduplication.
//!
//! Two interchangeable strategies share one flow:
//! - [`match_binary`]: black/white comparison, a window matches when at most
//!   `allowed_mismatches` pixels disagree. Optional horizontal flip.
//! - [`correlate`]: normalized dot product of gradient magnitudes, restricted
//!   to the template's strong edges. Every window gets a score.
//!
//! [`TemplateMatcher`] runs the configured strategy over all templates,
//! filters and sorts correlation scores, then applies [`nms`].
//!
//! Cost is `O((W - w + 1) · (H - h + 1) · w · h)` per template and
//! orientation, so keep templates small.

mod binary;
mod correlation;
mod matcher;
mod nms;

pub use binary::{match_binary, match_binary_mirrored};
pub use correlation::{correlate, CORRELATION_EPSILON, DEFAULT_WEAK_EDGE_FLOOR};
pub use matcher::{
    BinaryMatchParams, CorrelationMatchParams, MatchSet, MatchStrategy, TemplateMatchParams,
    TemplateMatcher,
};
pub use nms::{iou, nms, sort_by_score_desc, DEFAULT_IOU_THRESHOLD};
