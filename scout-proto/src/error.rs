//! Error types for each protocol.

use thiserror::Error;

/// Profile lookup errors.
///
/// `Clone` so that test doubles can hand out the same failure more than once.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No profile exists for the requested username.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The request took longer than the lookup's own deadline.
    #[error("timed out")]
    Timeout,

    /// The service answered with an unexpected status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The response could not be decoded into a profile.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The caller cancelled the request before it settled.
    #[error("cancelled")]
    Cancelled,
}

impl LookupError {
    /// Whether this error is the silent, caller-initiated kind.
    ///
    /// Cancelled lookups are never surfaced to a user; every other
    /// variant is a genuine failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LookupError::Cancelled)
    }
}

/// Key-value store errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a key failed for a reason other than absence.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// A write or remove failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised before any request is made.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The query was empty once surrounding whitespace was removed.
    #[error("search query is empty")]
    EmptyInput,
}
