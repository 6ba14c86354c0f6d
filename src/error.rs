use thiserror::Error;

/// Errors returned by the clustering engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Ingestion was handed an empty buffer.
    #[error("empty input buffer")]
    EmptyInput,

    /// Ingestion was handed a stride of zero.
    #[error("stride must be non-zero")]
    ZeroStride,

    /// Buffer length does not divide evenly into rows of `stride` values.
    #[error("buffer length {len} is not a multiple of stride {stride}")]
    RaggedBuffer {
        /// Length of the rejected buffer.
        len: usize,
        /// Stride the buffer was submitted with.
        stride: usize,
    },

    /// Submitted data does not match the dimensionality fixed at first ingestion.
    #[error("dimension mismatch: expected stride {expected}, found {found}")]
    DimensionMismatch {
        /// Stride the store was created with.
        expected: usize,
        /// Stride of the rejected buffer.
        found: usize,
    },

    /// A parameter value is outside its accepted range.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// An operation was invoked before its preconditions were established.
    #[error("engine is not ready: {0}")]
    NotReady(&'static str),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
