//! Error types for the GitHub fetch client

use thiserror::Error;

/// Errors that can occur when fetching files from a GitHub repository.
///
/// "File not found" is deliberately not in this list: a missing repository,
/// branch, or file yields an empty result set, not an error. These variants
/// cover everything else, so a caller can always tell "nothing there" apart
/// from "the fetch itself went wrong".
#[derive(Debug, Error)]
pub enum GithubError {
    /// Repository URL could not be parsed into an owner and a repository name
    #[error("Unrecognized repository URL: {0}")]
    InvalidRepoUrl(String),

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Unauthorized - bad or missing token
    #[error("Unauthorized - bad or missing token")]
    Unauthorized,

    /// Rate limited - too many requests
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Response parsing failed
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// File content could not be decoded
    #[error("Content decoding failed for {path}: {reason}")]
    ContentDecode {
        /// Path of the file whose content failed to decode
        path: String,
        /// What went wrong while decoding
        reason: String,
    },

    /// API returned an error
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },
}
