use isocheck_core::BufferError;
use isocheck_lines::GridError;

/// Errors returned by [`IsoValidator::validate`](super::IsoValidator::validate).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidateError {
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error(transparent)]
    Grid(#[from] GridError),
}
