//! Tolerant black/white window matching.

use std::collections::HashSet;

use isocheck_core::{BinaryBuffer, BoundingBox};
use log::warn;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Every window position where `template` differs from `candidate` in at most
/// `allowed_mismatches` pixels, in row-major order of the top-left corner.
///
/// A template larger than the candidate (or an empty one) yields no matches.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(candidate, template), fields(tw = template.width(), th = template.height()))
)]
pub fn match_binary(
    candidate: &BinaryBuffer,
    template: &BinaryBuffer,
    allowed_mismatches: usize,
) -> Vec<BoundingBox> {
    let (cw, ch) = (candidate.width(), candidate.height());
    let (tw, th) = (template.width(), template.height());
    if template.is_empty() || tw > cw || th > ch {
        warn!(
            "template {}x{} does not fit candidate {}x{}; no matches",
            tw, th, cw, ch
        );
        return Vec::new();
    }

    // template state is read once per window; keep it flat
    let tpl: Vec<bool> = (0..th)
        .flat_map(|y| (0..tw).map(move |x| (x, y)))
        .map(|(x, y)| template.is_black(x as isize, y as isize))
        .collect();

    let mut out = Vec::new();
    for oy in 0..=(ch - th) {
        for ox in 0..=(cw - tw) {
            if window_mismatches(candidate, &tpl, tw, ox, oy, allowed_mismatches)
                <= allowed_mismatches
            {
                out.push(BoundingBox::new(ox, oy, tw, th));
            }
        }
    }
    out
}

/// [`match_binary`] for the template and, when `mirror` is set, its
/// horizontal flip.
///
/// Mirrored hits at a position already matched upright are not repeated, so a
/// horizontally symmetric template yields the same boxes either way.
pub fn match_binary_mirrored(
    candidate: &BinaryBuffer,
    template: &BinaryBuffer,
    allowed_mismatches: usize,
    mirror: bool,
) -> Vec<BoundingBox> {
    let mut out = match_binary(candidate, template, allowed_mismatches);
    if !mirror {
        return out;
    }
    let flipped = template.mirrored_horizontal();
    if &flipped == template {
        return out;
    }

    let mut seen: HashSet<(usize, usize)> = out.iter().map(|b| (b.x, b.y)).collect();
    for b in match_binary(candidate, &flipped, allowed_mismatches) {
        if seen.insert((b.x, b.y)) {
            out.push(b);
        }
    }
    out
}

/// Mismatch count for one window, stopping as soon as it exceeds `limit`.
fn window_mismatches(
    candidate: &BinaryBuffer,
    tpl: &[bool],
    tw: usize,
    ox: usize,
    oy: usize,
    limit: usize,
) -> usize {
    let mut mismatches = 0;
    for (i, &t) in tpl.iter().enumerate() {
        let (x, y) = (ox + i % tw, oy + i / tw);
        if candidate.is_black(x as isize, y as isize) != t {
            mismatches += 1;
            if mismatches > limit {
                break;
            }
        }
    }
    mismatches
}

#[cfg(test)]
mod tests {
    use super::*;

    /// L-shaped glyph: left column plus bottom row of a 4x4 cell.
    fn glyph(x: usize, y: usize) -> bool {
        x == 0 || y == 3
    }

    fn candidate_with_glyph_at(ox: usize, oy: usize) -> BinaryBuffer {
        BinaryBuffer::from_fn(16, 12, |x, y| {
            x >= ox && y >= oy && x < ox + 4 && y < oy + 4 && glyph(x - ox, y - oy)
        })
    }

    #[test]
    fn exact_window_is_found_once() {
        let candidate = candidate_with_glyph_at(3, 4);
        let template = BinaryBuffer::from_fn(4, 4, glyph);
        let boxes = match_binary_mirrored(&candidate, &template, 0, true);
        assert_eq!(boxes, vec![BoundingBox::new(3, 4, 4, 4)]);
    }

    #[test]
    fn mirrored_occurrence_needs_the_flip() {
        let candidate = candidate_with_glyph_at(3, 4).mirrored_horizontal();
        let template = BinaryBuffer::from_fn(4, 4, glyph);
        assert!(match_binary(&candidate, &template, 0).is_empty());

        // 16 - 3 - 4 = 9
        let boxes = match_binary_mirrored(&candidate, &template, 0, true);
        assert_eq!(boxes, vec![BoundingBox::new(9, 4, 4, 4)]);
    }

    #[test]
    fn one_flipped_pixel_is_tolerated() {
        let clean = candidate_with_glyph_at(5, 2);
        // glyph with its corner pixel knocked out
        let candidate =
            BinaryBuffer::from_fn(16, 12, |x, y| (x, y) != (5, 5) && clean.is_black(x as isize, y as isize));
        let template = BinaryBuffer::from_fn(4, 4, glyph);

        assert!(match_binary(&candidate, &template, 0).is_empty());
        assert_eq!(
            match_binary(&candidate, &template, 1),
            vec![BoundingBox::new(5, 2, 4, 4)]
        );
    }

    #[test]
    fn symmetric_template_gives_the_same_boxes_with_or_without_flip() {
        let bar = |x: usize, y: usize| y == 1 && (1..=4).contains(&x);
        let candidate = BinaryBuffer::from_fn(20, 10, |x, y| {
            (y == 2 && (3..7).contains(&x)) || (y == 7 && (12..16).contains(&x))
        });
        let template = BinaryBuffer::from_fn(6, 3, bar);
        let plain = match_binary_mirrored(&candidate, &template, 0, false);
        let flipped = match_binary_mirrored(&candidate, &template, 0, true);
        assert_eq!(plain.len(), 2);
        assert_eq!(plain, flipped);
    }

    #[test]
    fn oversized_template_is_not_an_error() {
        let candidate = BinaryBuffer::white(4, 4);
        let template = BinaryBuffer::white(5, 2);
        assert!(match_binary_mirrored(&candidate, &template, 1, true).is_empty());
        assert!(match_binary(&candidate, &BinaryBuffer::white(0, 0), 1).is_empty());
    }
}
