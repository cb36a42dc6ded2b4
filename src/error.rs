//! Error types for the chunk stream and the chunk writer.

use thiserror::Error;

/// Failures raised by a chunk stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("stream is locked by another writer")]
    Locked,

    #[error("stream was closed by its consumer")]
    Closed,
}

/// Failures surfaced by the chunk-writer steps.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkWriterError {
    #[error("message id must not be empty")]
    EmptyMessageId,

    #[error("stream error: {0}")]
    Stream(#[from] StreamError),
}

/// Result type alias for chunk-writer steps
pub type Result<T> = std::result::Result<T, ChunkWriterError>;
