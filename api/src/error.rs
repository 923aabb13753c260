//! Transport error type.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, CORS, offline).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend rejected the bearer token. The session store has already
    /// been cleared when this is returned from a non-auth endpoint.
    #[error("Session expired, please sign in again")]
    Unauthorized,

    #[error("Request failed with status {0}: {1}")]
    Status(u16, String),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// One-line message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status(status, body) => {
                match body.lines().map(str::trim).find(|line| !line.is_empty()) {
                    Some(line) => format!("Request failed: {line}"),
                    None => format!("Request failed with status {status}"),
                }
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status(status.as_u16(), err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
