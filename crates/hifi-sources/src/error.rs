//! Listing source error types.

use thiserror::Error;

/// Errors that can occur when fetching listings from a marketplace.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The marketplace returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the marketplace.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The marketplace returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a marketplace response.
    #[error("parse error: {0}")]
    Parse(String),
}
