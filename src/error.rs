//! Error types for the ofs-client library.

use thiserror::Error;

/// Text shown for every transport-level failure.
pub const CONNECTION_ERROR: &str = "Connection error";

/// Main error type for ofs-client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Input rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// Server answered `success: false`.
    #[error("Server error: {}", message.as_deref().unwrap_or("request failed"))]
    Server { message: Option<String> },

    /// Server rejected the session id.
    #[error("Invalid session")]
    InvalidSession,

    /// No session is active on this client.
    #[error("Not logged in")]
    NotAuthenticated,

    /// HTTP request failed with status code.
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Request did not complete in time.
    #[error("HTTP request timed out")]
    Timeout,

    /// Transport failure that did not come from reqwest.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid or unexpected response from server.
    #[error("Invalid response from server")]
    InvalidResponse,

    /// Persisted session storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Destructive operation was not confirmed by the user.
    #[error("Operation requires confirmation")]
    ConfirmationRequired,

    /// Operation needs an open file but none is selected.
    #[error("No file selected")]
    NoActiveFile,

    /// The client actor is gone.
    #[error("Client actor stopped")]
    ActorStopped,
}

impl ClientError {
    /// Whether this error came from the transport rather than the server.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::HttpError(_)
                | ClientError::RequestError(_)
                | ClientError::Timeout
                | ClientError::Connection(_)
        )
    }

    /// Whether this error must tear down the session.
    pub fn is_invalid_session(&self) -> bool {
        matches!(self, ClientError::InvalidSession)
    }

    /// Text to surface to the user, with `fallback` used for server errors
    /// that carry no message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Server { message } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(fallback)
                .to_string(),
            ClientError::InvalidSession | ClientError::NotAuthenticated => {
                "Session expired, please login again".to_string()
            }
            e if e.is_transport() => CONNECTION_ERROR.to_string(),
            ClientError::JsonError(_) | ClientError::InvalidResponse => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for ofs-client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
