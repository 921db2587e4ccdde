//! Adapters between `image` buffers and [`PixelBuffer`], plus debug rendering.

use std::path::Path;

use ::image::RgbaImage;
use isocheck_core::{highlight_segments, outline_box, BufferError, PixelBuffer};

use crate::pipeline::ValidationResult;

/// Isometric segments in debug renders.
pub const ISOMETRIC_COLOR: [u8; 3] = [0, 255, 0];
/// Orthogonal segments in debug renders.
pub const ORTHOGONAL_COLOR: [u8; 3] = [0, 0, 255];
/// Template match outlines in debug renders.
pub const MATCH_COLOR: [u8; 3] = [255, 0, 0];

#[derive(thiserror::Error, Debug)]
pub enum ImageLoadError {
    #[error(transparent)]
    Image(#[from] ::image::ImageError),
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error("image dimensions {width}x{height} do not fit the image backend")]
    Dimensions { width: usize, height: usize },
}

/// Copy an RGBA image into a [`PixelBuffer`].
pub fn pixel_buffer_from_rgba(img: RgbaImage) -> Result<PixelBuffer, BufferError> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    PixelBuffer::new(w, h, img.into_raw())
}

/// Convert a [`PixelBuffer`] into an RGBA image.
pub fn to_rgba_image(buf: &PixelBuffer) -> Result<RgbaImage, ImageLoadError> {
    let dims = ImageLoadError::Dimensions {
        width: buf.width(),
        height: buf.height(),
    };
    let (Ok(w), Ok(h)) = (u32::try_from(buf.width()), u32::try_from(buf.height())) else {
        return Err(dims);
    };
    RgbaImage::from_raw(w, h, buf.data().to_vec()).ok_or(dims)
}

/// Decode any format `image` supports into a [`PixelBuffer`].
pub fn load_pixel_buffer(path: impl AsRef<Path>) -> Result<PixelBuffer, ImageLoadError> {
    let img = ::image::open(path)?.to_rgba8();
    Ok(pixel_buffer_from_rgba(img)?)
}

/// Overlay segments and match boxes on a copy of `candidate`.
pub fn render_debug(candidate: &PixelBuffer, result: &ValidationResult) -> PixelBuffer {
    let mut out = candidate.clone();
    highlight_segments(&mut out, &result.lines.orthogonal, ORTHOGONAL_COLOR);
    highlight_segments(&mut out, &result.lines.isometric, ISOMETRIC_COLOR);
    for b in &result.matches.boxes {
        outline_box(&mut out, b, MATCH_COLOR);
    }
    out
}

/// Write [`render_debug`] output to `path`; the format follows the extension.
pub fn write_debug_image(
    path: impl AsRef<Path>,
    candidate: &PixelBuffer,
    result: &ValidationResult,
) -> Result<(), ImageLoadError> {
    to_rgba_image(&render_debug(candidate, result))?.save(path)?;
    Ok(())
}
