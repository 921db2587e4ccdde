//! Directional tracing along the isometric step vectors.
//!
//! Each direction gets its own full-image pass with a private visited bitmap,
//! so a pixel can belong to segments of several directions but to at most one
//! segment per direction. A trace only starts at a true origin: a black,
//! unvisited pixel whose predecessor along `(-dx, -dy)` is not black.

use std::collections::HashSet;

use isocheck_core::{BinaryBuffer, PixelCoord, Segment, SegmentKind};
use log::debug;

use crate::blob::is_blob;

/// Step vectors for slopes ±1, ±0.5 and ±2, in pass order.
pub const ISOMETRIC_DIRECTIONS: [(i32, i32); 12] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Trace every segment along one step vector.
///
/// A trace stops before a white, already visited or blob pixel, or at the
/// buffer edge. A blob that stops a trace is marked visited so later starts
/// skip it.
pub fn trace_direction(buf: &BinaryBuffer, (dx, dy): (i32, i32), min_length: usize) -> Vec<Segment> {
    let (w, h) = (buf.width(), buf.height());
    let mut out = Vec::new();
    if (dx, dy) == (0, 0) || w == 0 || h == 0 {
        return out;
    }

    let (sx, sy) = (dx as isize, dy as isize);
    let mut visited = vec![false; w * h];
    let kind = SegmentKind::Isometric { dx, dy };

    for y in 0..h {
        for x in 0..w {
            if visited[y * w + x] || !buf.is_black(x as isize, y as isize) {
                continue;
            }
            if buf.is_black(x as isize - sx, y as isize - sy) {
                continue;
            }

            let mut points = Vec::new();
            let (mut cx, mut cy) = (x as isize, y as isize);
            // is_black is false outside the buffer, so it doubles as the bounds check
            while buf.is_black(cx, cy) {
                let ci = cy as usize * w + cx as usize;
                if visited[ci] {
                    break;
                }
                visited[ci] = true;
                if is_blob(buf, cx, cy) {
                    break;
                }
                points.push(PixelCoord::new(cx as usize, cy as usize));
                cx += sx;
                cy += sy;
            }

            if points.len() >= min_length {
                out.push(Segment { kind, points });
            }
        }
    }
    out
}

/// Run all twelve direction passes and merge the results in direction order.
///
/// Opposite directions walk the same unbroken run from either end; a segment
/// that is exactly the reverse of one already emitted for the opposite step is
/// dropped. Runs split differently by blobs are kept from both sides.
pub fn find_isometric_segments(buf: &BinaryBuffer, min_length: usize) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut emitted: HashSet<(PixelCoord, PixelCoord, (i32, i32))> = HashSet::new();
    let mut reversed_duplicates = 0usize;

    for &dir in &ISOMETRIC_DIRECTIONS {
        for seg in trace_direction(buf, dir, min_length) {
            let (Some(start), Some(end)) = (seg.start(), seg.end()) else {
                continue;
            };
            if emitted.contains(&(end, start, (-dir.0, -dir.1))) {
                reversed_duplicates += 1;
                continue;
            }
            emitted.insert((start, end, dir));
            out.push(seg);
        }
    }

    debug!(
        "isometric pass: {} segments ({} reversed duplicates dropped)",
        out.len(),
        reversed_duplicates
    );
    out
}
