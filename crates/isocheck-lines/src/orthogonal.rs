//! Row and column runs.

use isocheck_core::{BinaryBuffer, PixelCoord, Segment, SegmentKind};

use crate::blob::is_blob;

/// Black runs along every row, scanned left to right.
pub fn find_horizontal_segments(buf: &BinaryBuffer, min_length: usize) -> Vec<Segment> {
    let mut out = Vec::new();
    for y in 0..buf.height() {
        scan_line(buf, buf.width(), |i| (i, y), SegmentKind::Horizontal, min_length, &mut out);
    }
    out
}

/// Black runs along every column, scanned top to bottom.
pub fn find_vertical_segments(buf: &BinaryBuffer, min_length: usize) -> Vec<Segment> {
    let mut out = Vec::new();
    for x in 0..buf.width() {
        scan_line(buf, buf.height(), |i| (x, i), SegmentKind::Vertical, min_length, &mut out);
    }
    out
}

/// Horizontal runs followed by vertical runs.
pub fn find_orthogonal_segments(buf: &BinaryBuffer, min_length: usize) -> Vec<Segment> {
    let mut out = find_horizontal_segments(buf, min_length);
    out.extend(find_vertical_segments(buf, min_length));
    out
}

/// Split one scan line into runs.
///
/// A run ends before a blob pixel or a white pixel. After a blob stop the
/// blob pixel itself is skipped so the scan always advances.
fn scan_line(
    buf: &BinaryBuffer,
    len: usize,
    at: impl Fn(usize) -> (usize, usize),
    kind: SegmentKind,
    min_length: usize,
    out: &mut Vec<Segment>,
) {
    let black = |i: usize| {
        let (x, y) = at(i);
        buf.is_black(x as isize, y as isize)
    };
    let blob = |i: usize| {
        let (x, y) = at(i);
        is_blob(buf, x as isize, y as isize)
    };

    let mut i = 0;
    while i < len {
        if !black(i) {
            i += 1;
            continue;
        }

        let mut points = Vec::new();
        let mut stopped_on_blob = false;
        while i < len && black(i) {
            if blob(i) {
                stopped_on_blob = true;
                break;
            }
            let (x, y) = at(i);
            points.push(PixelCoord::new(x, y));
            i += 1;
        }

        if points.len() >= min_length {
            out.push(Segment { kind, points });
        }
        if stopped_on_blob {
            i += 1;
        }
    }
}
