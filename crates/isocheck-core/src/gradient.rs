//! Sobel gradients with magnitude and angle.
//!
//! - Convolves the 3×3 Sobel pair with replicate-edge boundary handling.
//! - Outputs per-pixel `magnitude = sqrt(gx² + gy²)` and
//!   `angle = atan2(gy, gx)` in degrees, wrapped to `[0, 360)`.
//!
//! Complexity: O(W·H); memory: two float buffers.

use crate::buffer::CHANNELS;
use crate::{BufferError, LumaImage, PixelBuffer};

#[cfg(feature = "tracing")]
use tracing::instrument;

const SOBEL_X: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
const SOBEL_Y: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

/// Default threshold (0..255 scale) for [`GradientField::edge_image`].
pub const DEFAULT_EDGE_DISPLAY_THRESHOLD: f32 = 99.0;

/// Per-pixel gradient magnitude and angle.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientField {
    pub width: usize,
    pub height: usize,
    pub magnitude: Vec<f32>,
    /// Degrees in `[0, 360)`.
    pub angle: Vec<f32>,
}

impl GradientField {
    #[inline]
    pub fn magnitude_at(&self, x: usize, y: usize) -> f32 {
        self.magnitude[y * self.width + x]
    }

    /// Largest magnitude in the field, `0` for an empty field.
    pub fn max_magnitude(&self) -> f32 {
        self.magnitude.iter().copied().fold(0.0, f32::max)
    }

    /// Field of the horizontally mirrored image.
    ///
    /// Mirroring negates `gx`, so angles map to `180° - angle` (wrapped).
    pub fn mirrored_horizontal(&self) -> GradientField {
        let mut magnitude = Vec::with_capacity(self.magnitude.len());
        let mut angle = Vec::with_capacity(self.angle.len());
        for y in 0..self.height {
            for x in (0..self.width).rev() {
                let i = y * self.width + x;
                magnitude.push(self.magnitude[i]);
                angle.push(wrap_degrees(180.0 - self.angle[i]));
            }
        }
        GradientField {
            width: self.width,
            height: self.height,
            magnitude,
            angle,
        }
    }

    /// Normalized, thresholded edge map for display.
    ///
    /// Each magnitude is scaled to `0..=255` by the field maximum; values above
    /// `threshold` become white, everything else black. A flat field renders
    /// fully black. Not used for scoring.
    pub fn edge_image(&self, threshold: f32) -> PixelBuffer {
        let max_mag = self.max_magnitude();
        let mut data = Vec::with_capacity(self.magnitude.len() * CHANNELS);
        for &m in &self.magnitude {
            let scaled = if max_mag > 0.0 { m / max_mag * 255.0 } else { 0.0 };
            let v = if scaled > threshold { 255 } else { 0 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
        PixelBuffer::from_raw_unchecked(self.width, self.height, data)
    }
}

#[inline]
fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid may round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Compute Sobel gradients over a luma image.
///
/// Fails with [`BufferError::ZeroArea`] for an empty image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(gray), fields(width = gray.width, height = gray.height))
)]
pub fn sobel(gray: &LumaImage) -> Result<GradientField, BufferError> {
    let (w, h) = (gray.width, gray.height);
    if w == 0 || h == 0 {
        return Err(BufferError::ZeroArea {
            width: w,
            height: h,
        });
    }
    if gray.data.len() != w * h {
        return Err(BufferError::LengthMismatch {
            expected: w * h,
            got: gray.data.len(),
        });
    }

    let mut magnitude = vec![0f32; w * h];
    let mut angle = vec![0f32; w * h];

    for y in 0..h {
        for x in 0..w {
            let mut gx = 0f32;
            let mut gy = 0f32;
            let mut k = 0;
            for dy in -1..=1isize {
                for dx in -1..=1isize {
                    let v = gray.get_clamped(x as isize + dx, y as isize + dy);
                    gx += v * SOBEL_X[k];
                    gy += v * SOBEL_Y[k];
                    k += 1;
                }
            }
            let i = y * w + x;
            magnitude[i] = (gx * gx + gy * gy).sqrt();
            let mut deg = gy.atan2(gx).to_degrees();
            if deg < 0.0 {
                deg += 360.0;
            }
            angle[i] = wrap_degrees(deg);
        }
    }

    Ok(GradientField {
        width: w,
        height: h,
        magnitude,
        angle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn luma_from_fn(w: usize, h: usize, f: impl Fn(usize, usize) -> f32) -> LumaImage {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        LumaImage {
            width: w,
            height: h,
            data,
        }
    }

    #[test]
    fn flat_image_has_zero_gradient() {
        let img = luma_from_fn(5, 4, |_, _| 42.0);
        let g = sobel(&img).expect("non-empty");
        assert!(g.magnitude.iter().all(|&m| m == 0.0));
        assert!(g.angle.iter().all(|&a| (0.0..360.0).contains(&a)));
    }

    #[test]
    fn vertical_step_points_along_x() {
        // dark left half, bright right half
        let img = luma_from_fn(6, 3, |x, _| if x < 3 { 0.0 } else { 100.0 });
        let g = sobel(&img).expect("non-empty");
        // at x=2 the kernel sees [0, 0, 100] in every row: gx = 4 * 100
        assert_relative_eq!(g.magnitude_at(2, 1), 400.0);
        assert_relative_eq!(g.angle[6 + 2], 0.0);
        // replicate-edge boundary: the first column sees a flat neighborhood
        assert_relative_eq!(g.magnitude_at(0, 1), 0.0);
    }

    #[test]
    fn negative_angles_wrap_into_range() {
        // bright left, dark right => gx < 0 => angle 180
        let img = luma_from_fn(4, 3, |x, _| if x < 2 { 100.0 } else { 0.0 });
        let g = sobel(&img).expect("non-empty");
        assert_relative_eq!(g.angle[4 + 1], 180.0);

        // bright bottom, dark top => gy > 0 => 90; bright top => 270
        let img = luma_from_fn(3, 4, |_, y| if y < 2 { 100.0 } else { 0.0 });
        let g = sobel(&img).expect("non-empty");
        assert_relative_eq!(g.angle[3 + 1], 270.0);
    }

    #[test]
    fn zero_area_is_rejected() {
        let img = LumaImage {
            width: 0,
            height: 0,
            data: Vec::new(),
        };
        assert_eq!(
            sobel(&img),
            Err(BufferError::ZeroArea {
                width: 0,
                height: 0
            })
        );
    }

    #[test]
    fn edge_image_is_binary_and_flat_fields_render_black() {
        let img = luma_from_fn(6, 3, |x, _| if x < 3 { 0.0 } else { 100.0 });
        let g = sobel(&img).expect("non-empty");
        let edges = g.edge_image(DEFAULT_EDGE_DISPLAY_THRESHOLD);
        assert_eq!(edges.pixel(2, 1), Some([255, 255, 255, 255]));
        assert_eq!(edges.pixel(0, 1), Some([0, 0, 0, 255]));

        let flat = sobel(&luma_from_fn(3, 3, |_, _| 7.0)).expect("non-empty");
        assert!(flat
            .edge_image(DEFAULT_EDGE_DISPLAY_THRESHOLD)
            .data()
            .chunks_exact(4)
            .all(|px| px[0] == 0));
    }

    #[test]
    fn mirrored_field_matches_gradient_of_mirrored_image() {
        let img = luma_from_fn(5, 4, |x, y| (x * 13 + y * 7) as f32 % 29.0);
        let mirrored_img = luma_from_fn(5, 4, |x, y| ((4 - x) * 13 + y * 7) as f32 % 29.0);
        let a = sobel(&img).expect("non-empty").mirrored_horizontal();
        let b = sobel(&mirrored_img).expect("non-empty");
        for i in 0..a.magnitude.len() {
            assert_relative_eq!(a.magnitude[i], b.magnitude[i], epsilon = 1e-4);
        }
    }
}
