//! Error types for live-search operations
//!
//! The debounce core itself is total; errors only arise at the edges
//! (configuration, the async input surface after teardown, and I/O in the
//! demo binary).

use thiserror::Error;

/// Errors that can occur around the search pipeline
#[derive(Debug, Error)]
pub enum SearchError {
    /// Invalid or unparsable configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The pipeline was torn down and no longer accepts input
    #[error("Pipeline disposed: {0}")]
    Disposed(String),

    /// I/O error while reading input or writing output
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for live-search operations
pub type SearchResult<T> = Result<T, SearchError>;

impl From<std::io::Error> for SearchError {
    fn from(err: std::io::Error) -> Self {
        SearchError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Serialization(err.to_string())
    }
}
