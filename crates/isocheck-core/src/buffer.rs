//! Owned raster buffers.
//!
//! [`PixelBuffer`] holds interleaved RGBA bytes, row-major with a top-left
//! origin. [`BinaryBuffer`] is the same layout restricted to pure black and
//! white opaque pixels; "black" means the first color channel is `0`.

use crate::BufferError;

/// Number of interleaved channels per pixel (three color + opacity).
pub const CHANNELS: usize = 4;

/// ITU-R BT.601 luma of one RGB triple.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Four-channel raster, `data.len() == width * height * 4`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes, checking the length invariant.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, BufferError> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(BufferError::LengthMismatch {
                expected: usize::MAX,
                got: data.len(),
            })?;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer with every pixel set to `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        Self::from_fn(width, height, |_, _| rgba)
    }

    /// Build a buffer pixel by pixel in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw interleaved bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// `true` when the buffer has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Fail with [`BufferError::ZeroArea`] for buffers without pixels.
    pub fn ensure_non_empty(&self) -> Result<(), BufferError> {
        if self.is_empty() {
            return Err(BufferError::ZeroArea {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// RGBA value at `(x, y)`, `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * CHANNELS;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub(crate) fn from_raw_unchecked(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height * CHANNELS);
        Self {
            width,
            height,
            data,
        }
    }

    pub(crate) fn put_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y * self.width + x) * CHANNELS;
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Copy out the `width × height` region whose top-left corner is `(x, y)`.
    pub fn crop(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<PixelBuffer, BufferError> {
        let fits_x = x.checked_add(width).is_some_and(|r| r <= self.width);
        let fits_y = y.checked_add(height).is_some_and(|b| b <= self.height);
        if !fits_x || !fits_y {
            return Err(BufferError::CropOutOfBounds {
                x,
                y,
                width,
                height,
                buf_width: self.width,
                buf_height: self.height,
            });
        }

        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for row in y..y + height {
            let start = (row * self.width + x) * CHANNELS;
            data.extend_from_slice(&self.data[start..start + width * CHANNELS]);
        }
        Ok(PixelBuffer {
            width,
            height,
            data,
        })
    }

    /// Reverse the column order of every row, keeping channel values.
    pub fn mirrored_horizontal(&self) -> PixelBuffer {
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.data.chunks_exact(self.width.max(1) * CHANNELS) {
            for px in row.chunks_exact(CHANNELS).rev() {
                data.extend_from_slice(px);
            }
        }
        PixelBuffer {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Per-pixel luma as floats.
    pub fn to_luma(&self) -> LumaImage {
        let data = self
            .data
            .chunks_exact(CHANNELS)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect();
        LumaImage {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// Single-channel float image, row-major, `data.len() == width * height`.
#[derive(Clone, Debug, PartialEq)]
pub struct LumaImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl LumaImage {
    /// Sample with replicate-edge boundary handling.
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> f32 {
        let cx = x.clamp(0, self.width as isize - 1) as usize;
        let cy = y.clamp(0, self.height as isize - 1) as usize;
        self.data[cy * self.width + cx]
    }
}

const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Strict black/white buffer.
///
/// Every pixel has equal color channels in `{0, 255}` and opacity `255`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryBuffer(PixelBuffer);

impl BinaryBuffer {
    /// Build from a predicate returning `true` for black pixels.
    pub fn from_fn(width: usize, height: usize, mut is_black: impl FnMut(usize, usize) -> bool) -> Self {
        Self(PixelBuffer::from_fn(width, height, |x, y| {
            if is_black(x, y) {
                BLACK
            } else {
                WHITE
            }
        }))
    }

    /// All-white buffer.
    pub fn white(width: usize, height: usize) -> Self {
        Self(PixelBuffer::filled(width, height, WHITE))
    }

    pub(crate) fn from_pixels_unchecked(pixels: PixelBuffer) -> Self {
        Self(pixels)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.0.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.0.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Black test with signed coordinates; anything outside the buffer is not black.
    #[inline]
    pub fn is_black(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 || x >= self.0.width as isize || y >= self.0.height as isize {
            return false;
        }
        self.0.data[(y as usize * self.0.width + x as usize) * CHANNELS] == 0
    }

    /// Number of black pixels in the whole buffer.
    pub fn count_black(&self) -> usize {
        self.0
            .data
            .chunks_exact(CHANNELS)
            .filter(|px| px[0] == 0)
            .count()
    }

    pub fn mirrored_horizontal(&self) -> BinaryBuffer {
        Self(self.0.mirrored_horizontal())
    }

    pub fn as_pixels(&self) -> &PixelBuffer {
        &self.0
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.0
    }
}

impl TryFrom<PixelBuffer> for BinaryBuffer {
    type Error = BufferError;

    /// Accept an already thresholded buffer, rejecting any grey or translucent pixel.
    fn try_from(pixels: PixelBuffer) -> Result<Self, Self::Error> {
        for (i, px) in pixels.data.chunks_exact(CHANNELS).enumerate() {
            let binary = (px[0] == 0 || px[0] == 255)
                && px[1] == px[0]
                && px[2] == px[0]
                && px[3] == 255;
            if !binary {
                return Err(BufferError::NotBinary {
                    x: i % pixels.width,
                    y: i / pixels.width,
                });
            }
        }
        Ok(Self(pixels))
    }
}
