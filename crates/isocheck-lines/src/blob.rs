use isocheck_core::BinaryBuffer;

/// A pixel is a blob when its right, left, lower and upper neighbors are all black.
///
/// Blob pixels sit inside filled 2-D regions; every tracer stops before them
/// so that solid areas are not reported as lines. Neighbors outside the
/// buffer count as white.
#[inline]
pub fn is_blob(buf: &BinaryBuffer, x: isize, y: isize) -> bool {
    buf.is_black(x + 1, y)
        && buf.is_black(x - 1, y)
        && buf.is_black(x, y + 1)
        && buf.is_black(x, y - 1)
}
