//! Grayscale + threshold conversion.

use crate::buffer::{luma, CHANNELS};
use crate::{BinaryBuffer, PixelBuffer};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Convert a color buffer into a strict black/white buffer.
///
/// A pixel becomes white when its luma is `>= threshold` and black otherwise;
/// opacity is forced to 255. Pixel-art scans are typically thresholded at 1 or
/// 2 so that only true-black outlines survive.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(buf), fields(width = buf.width(), height = buf.height()))
)]
pub fn binarize(buf: &PixelBuffer, threshold: f32) -> BinaryBuffer {
    let mut data = Vec::with_capacity(buf.data().len());
    for px in buf.data().chunks_exact(CHANNELS) {
        let value = if luma(px[0], px[1], px[2]) >= threshold {
            255
        } else {
            0
        };
        data.extend_from_slice(&[value, value, value, 255]);
    }
    BinaryBuffer::from_pixels_unchecked(PixelBuffer::from_raw_unchecked(
        buf.width(),
        buf.height(),
        data,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_strictly_binary_and_opaque() {
        let buf = PixelBuffer::from_fn(16, 16, |x, y| {
            [(x * 16) as u8, (y * 16) as u8, (x * y) as u8, (x * 7) as u8]
        });
        let bin = binarize(&buf, 100.0);
        for px in bin.as_pixels().data().chunks_exact(4) {
            assert!(px[0] == 0 || px[0] == 255);
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 255);
        }
        assert_eq!(bin.width(), 16);
        assert_eq!(bin.height(), 16);
    }

    #[test]
    fn threshold_is_inclusive() {
        let buf = PixelBuffer::from_fn(3, 1, |x, _| match x {
            0 => [0, 0, 0, 255],
            1 => [2, 2, 2, 255],
            _ => [255, 255, 255, 0],
        });
        let bin = binarize(&buf, 2.0 - 1e-3);
        assert!(bin.is_black(0, 0));
        assert!(!bin.is_black(1, 0));
        assert!(!bin.is_black(2, 0));
    }

    #[test]
    fn luma_weights_favor_green() {
        let green = PixelBuffer::filled(1, 1, [0, 10, 0, 255]);
        let blue = PixelBuffer::filled(1, 1, [0, 0, 10, 255]);
        assert!(!binarize(&green, 5.0).is_black(0, 0));
        assert!(binarize(&blue, 5.0).is_black(0, 0));
    }
}
