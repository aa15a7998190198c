use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Format error: {0}")]
    Format(String),

    #[error("Unsupported configuration: {0}")]
    UnsupportedConfig(String),

    #[error("Frame {index} is {actual_width}x{actual_height}, expected {width}x{height}")]
    FrameSizeMismatch {
        index: usize,
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("No frames to encode")]
    EmptyInput,
}

impl CodecError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        CodecError::Format(msg.into())
    }
}
