//! Normalized cross-correlation over gradient magnitudes.
//!
//! Only template pixels whose magnitude exceeds the weak-edge floor take part;
//! the candidate norm is taken over the same masked positions. Scores lie in
//! `[0, 1]` for non-negative magnitudes.

use isocheck_core::{BoundingBox, GradientField};
use log::warn;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Guards zero-norm windows.
pub const CORRELATION_EPSILON: f32 = 1e-8;

/// Default weak-edge floor on the 0..~1443 Sobel magnitude scale.
pub const DEFAULT_WEAK_EDGE_FLOOR: f32 = 10.0;

/// Scored box for every window position, in row-major order.
///
/// Callers filter by a score threshold and sort before suppression.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(candidate, template), fields(tw = template.width, th = template.height))
)]
pub fn correlate(
    candidate: &GradientField,
    template: &GradientField,
    weak_edge_floor: f32,
) -> Vec<BoundingBox> {
    let (cw, ch) = (candidate.width, candidate.height);
    let (tw, th) = (template.width, template.height);
    if tw == 0 || th == 0 || tw > cw || th > ch {
        warn!(
            "template {}x{} does not fit candidate {}x{}; no matches",
            tw, th, cw, ch
        );
        return Vec::new();
    }

    // strong template edges: (dx, dy, magnitude)
    let strong: Vec<(usize, usize, f32)> = (0..th)
        .flat_map(|y| (0..tw).map(move |x| (x, y)))
        .filter_map(|(x, y)| {
            let m = template.magnitude_at(x, y);
            (m > weak_edge_floor).then_some((x, y, m))
        })
        .collect();
    let t_norm = strong.iter().map(|&(_, _, m)| m * m).sum::<f32>().sqrt();

    let mut out = Vec::with_capacity((cw - tw + 1) * (ch - th + 1));
    for oy in 0..=(ch - th) {
        for ox in 0..=(cw - tw) {
            let mut dot = 0f32;
            let mut c_sq = 0f32;
            for &(x, y, m) in &strong {
                let c = candidate.magnitude_at(ox + x, oy + y);
                dot += m * c;
                c_sq += c * c;
            }
            let score = dot / (t_norm * c_sq.sqrt() + CORRELATION_EPSILON);
            out.push(BoundingBox::new(ox, oy, tw, th).with_score(score));
        }
    }
    out
}
