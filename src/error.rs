//! Error types for Holocron
//!
//! `FetchError` covers everything that can go wrong talking to the character
//! API. Its `Display` text is the message shown to the user. `HolocronError`
//! covers failures of the application around it.

use thiserror::Error;

/// Fallback text when a transport failure carries no message of its own
pub const GENERIC_TRANSPORT_MESSAGE: &str = "Network or request error";

/// Failure of a single character search request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network unreachable, DNS failure, broken connection, bad URL
    #[error("{}", transport_message(.0))]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Request failed: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    /// The body was not JSON or had no `results` array
    #[error("Invalid response from server")]
    MalformedResponse,
}

fn transport_message(message: &str) -> &str {
    if message.trim().is_empty() {
        GENERIC_TRANSPORT_MESSAGE
    } else {
        message
    }
}

impl FetchError {
    /// Transport failures and 5xx responses may succeed if the user tries again.
    /// Nothing retries automatically; this only picks the log severity.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            FetchError::HttpStatus { status, .. } => *status >= 500,
            FetchError::MalformedResponse => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return FetchError::MalformedResponse;
        }
        FetchError::Transport(e.to_string())
    }
}

/// Main error type for Holocron operations
#[derive(Error, Debug)]
pub enum HolocronError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to build HTTP client: {0}")]
    HttpClientError(String),

    #[error("Failed to open log file '{0}': {1}")]
    LogFileError(String, std::io::Error),

    #[error("Invalid log level '{0}'")]
    InvalidLogLevel(String),

    #[error("{0}")]
    SearchFailed(String),

    #[error("Timed out waiting for the search to finish")]
    Timeout,

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for Holocron operations
pub type Result<T> = std::result::Result<T, HolocronError>;
