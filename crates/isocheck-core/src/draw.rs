//! Debug overlays.
//!
//! These are the only operations that mutate a buffer in place. They exist
//! for rendering results and never feed back into scoring.

use crate::{BoundingBox, PixelBuffer, Segment};

/// Recolor every segment pixel with `rgb` (opaque). Points outside the buffer are skipped.
pub fn highlight_segments(buf: &mut PixelBuffer, segments: &[Segment], rgb: [u8; 3]) {
    let rgba = [rgb[0], rgb[1], rgb[2], 255];
    for p in segments.iter().flat_map(|s| s.points.iter()) {
        buf.put_pixel(p.x, p.y, rgba);
    }
}

/// Draw a 1-pixel outline of `bbox`, clipped to the buffer.
pub fn outline_box(buf: &mut PixelBuffer, bbox: &BoundingBox, rgb: [u8; 3]) {
    if bbox.width == 0 || bbox.height == 0 {
        return;
    }
    let rgba = [rgb[0], rgb[1], rgb[2], 255];
    let (x0, y0) = (bbox.x, bbox.y);
    let (x1, y1) = (bbox.right() - 1, bbox.bottom() - 1);
    for x in x0..=x1 {
        buf.put_pixel(x, y0, rgba);
        buf.put_pixel(x, y1, rgba);
    }
    for y in y0..=y1 {
        buf.put_pixel(x0, y, rgba);
        buf.put_pixel(x1, y, rgba);
    }
}
