/*!
 * Error types for the srtran application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Typed failures of the text-completion service.
///
/// These variants drive the retry policy: rate limiting retries with
/// exponential backoff, transient failures retry with a fixed delay, and
/// everything else terminates the attempt loop immediately.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The service signalled a rate limit (HTTP 429 or equivalent)
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// The request was rejected by a safety policy
    #[error("Request blocked by safety policy: {0}")]
    SafetyBlocked(String),

    /// The service returned a response with no usable text
    #[error("Completion service returned an empty response")]
    EmptyResponse,

    /// The configured model identifier is unknown to the service
    #[error("Unknown model identifier: {0}")]
    InvalidModel(String),

    /// The per-call timeout elapsed before a response arrived
    #[error("Completion request timed out: {0}")]
    Timeout(String),

    /// No API credentials were configured
    #[error("Missing API credentials: {0}")]
    MissingCredentials(String),

    /// The API itself responded with an error status
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Sending the request failed (network/transport)
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The response body could not be decoded
    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

impl CompletionError {
    /// Whether this failure class should be retried at all
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited(_) => true,
            Self::RequestFailed(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

/// Errors that abort a whole translation run.
///
/// Per-batch and per-entry failures never surface here; they degrade to
/// original text inside the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input yielded no parseable subtitle entries
    #[error("No parseable subtitle entries found in the input")]
    NoEntries,

    /// The configured target language could not be resolved
    #[error("Unsupported target language: {0}")]
    UnsupportedLanguage(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the completion service
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// Error from the translation pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
