/// Errors raised when a raster buffer violates a precondition.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("zero-area buffer (width={width}, height={height})")]
    ZeroArea { width: usize, height: usize },

    #[error("invalid pixel buffer length (expected {expected} bytes, got {got})")]
    LengthMismatch { expected: usize, got: usize },

    #[error("pixel ({x}, {y}) is not strictly black or white")]
    NotBinary { x: usize, y: usize },

    #[error(
        "crop {width}x{height} at ({x}, {y}) exceeds the {buf_width}x{buf_height} buffer"
    )]
    CropOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        buf_width: usize,
        buf_height: usize,
    },
}
