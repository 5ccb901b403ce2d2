//! Error taxonomy for the scan pipeline
//!
//! Scanning itself is deterministic and single-pass; every failure here is
//! detected before the first chunk is processed. There are no retryable
//! errors: a rejected request is reported once and the scan never starts.

use thiserror::Error;

/// Reasons a search request is rejected up front.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The request asked for a zero-byte chunk size.
    #[error("chunk size must be at least 1 byte")]
    InvalidChunkSize,

    /// The keyword list contains an empty string, which would produce
    /// zero-length matches at every position.
    #[error("keywords must not be empty strings")]
    EmptyKeyword,

    /// The keyword set could not be compiled into a matcher.
    #[error("failed to compile keyword pattern: {0}")]
    Pattern(#[from] regex::Error),
}
