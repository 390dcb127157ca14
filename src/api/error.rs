//! API Error Types
//!
//! Two failure classes reach callers: transport failures (no response was
//! received; the underlying `reqwest` error is surfaced unmodified) and
//! server failures (a response arrived with a failing status and is
//! re-wrapped into a [`NormalizedError`]). A success response whose body
//! does not match the expected payload shape is a `Decode` error.

use std::fmt;
use thiserror::Error;

/// Fallback message when a failing response carries no `error` field
pub const GENERIC_FAILURE: &str = "Request failed";

/// The single error shape surfaced for server-side failures
///
/// Produced once per failed call; immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    pub message: String,
}

impl NormalizedError {
    /// Message extraction chain for a failing response body: the `error`
    /// field if present, the fixed fallback otherwise.
    pub fn from_body(body: Option<&serde_json::Value>) -> Self {
        let message = body
            .and_then(|v| v.get("error"))
            .and_then(|e| e.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());

        Self { message }
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Errors returned by [`ApiClient`](crate::api::ApiClient) operations
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response was received (network failure, timeout)
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The server responded with a failing status
    #[error("{0}")]
    Server(NormalizedError),

    /// The request payload could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// A success response did not match the expected payload shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
