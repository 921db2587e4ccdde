/// Errors returned by the grid scorer.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid must have at least one column and one row (cols={cols}, rows={rows})")]
    InvalidDimensions { cols: usize, rows: usize },

    #[error("zero-area buffer (width={width}, height={height})")]
    ZeroArea { width: usize, height: usize },

    #[error("{cols}x{rows} grid does not fit a {width}x{height} buffer")]
    GridExceedsBuffer {
        cols: usize,
        rows: usize,
        width: usize,
        height: usize,
    },

    #[error("decay rate must be finite (got {decay_rate})")]
    InvalidDecayRate { decay_rate: f32 },
}
