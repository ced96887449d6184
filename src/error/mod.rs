//! Error handling module for ffbatch

use thiserror::Error;

/// Main error type for ffbatch operations
///
/// Per-job failures never appear here: FFmpeg errors are collected as
/// display strings in the run report. This enum carries only the
/// configuration errors that abort the process before any job starts.
#[derive(Error, Debug)]
pub enum FfbatchError {
    /// A second `.txt` input was passed after `-i`
    #[error("Only one .txt file is allowed for batch execution")]
    DuplicateBatchInput,

    /// Batch list file could not be read
    #[error("Failed to read batch list {path}: {source}")]
    BatchListRead {
        path: String,
        source: std::io::Error,
    },

    /// Interrupt listener could not be installed
    #[error("Failed to install interrupt handler: {0}")]
    SignalHandler(#[from] ctrlc::Error),
}

/// Result type alias for ffbatch operations
pub type FfbatchResult<T> = std::result::Result<T, FfbatchError>;
