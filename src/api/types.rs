//! Request bodies and normalised replies.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ServerMessage;
use crate::error::{ClientError, Result};
use crate::fs::FileEntry;

/// `{username, password}` for signup and login.
#[derive(Debug, Serialize)]
pub(crate) struct CredentialsRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `{session_id}` for session check and logout.
#[derive(Debug, Serialize)]
pub(crate) struct SessionRequest<'a> {
    pub session_id: &'a str,
}

/// `{path, session_id}` for list, read, delete and mkdir.
#[derive(Debug, Serialize)]
pub(crate) struct PathRequest<'a> {
    pub path: &'a str,
    pub session_id: &'a str,
}

/// `{path, content, session_id}` for create and edit.
#[derive(Debug, Serialize)]
pub(crate) struct ContentRequest<'a> {
    pub path: &'a str,
    pub content: &'a str,
    pub session_id: &'a str,
}

/// Reply with no fields beyond the success flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {}

/// Successful `/user/login` reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Successful `/user/session` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub username: Option<String>,
}

/// Successful `/file/list` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListReply {
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// Successful `/file/read` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReadReply {
    #[serde(default)]
    pub content: String,
}

/// A server reply normalised to success-with-payload or failure-with-message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    /// `success: true` and the operation-specific fields
    Success(T),
    /// `success: false`, with `message` (or `error`) if the server sent one
    Failure { message: Option<String> },
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decode a raw response body.
    ///
    /// Anything that is not a JSON object is an invalid response. A missing
    /// `success` flag counts as failure.
    pub fn parse(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        let obj = value.as_object().ok_or(ClientError::InvalidResponse)?;

        let success = obj.get("success").and_then(Value::as_bool).unwrap_or(false);
        if success {
            let payload = serde_json::from_value(value)?;
            return Ok(ApiResponse::Success(payload));
        }

        let message = ["message", "error"]
            .iter()
            .find_map(|k| obj.get(*k).and_then(Value::as_str))
            .map(str::to_string);
        Ok(ApiResponse::Failure { message })
    }
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    /// Server message of a failed reply.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiResponse::Success(_) => None,
            ApiResponse::Failure { message } => message.as_deref(),
        }
    }

    /// Classified failure message, `None` on success.
    pub fn server_message(&self) -> Option<ServerMessage> {
        match self {
            ApiResponse::Success(_) => None,
            ApiResponse::Failure { message } => Some(
                message
                    .as_deref()
                    .map(ServerMessage::from)
                    .unwrap_or(ServerMessage::Other),
            ),
        }
    }

    /// Whether the server rejected the session.
    pub fn is_invalid_session(&self) -> bool {
        self.server_message()
            .map(|m| m.is_session_error())
            .unwrap_or(false)
    }

    /// Convert into a `Result`, mapping the invalid-session sentinel to
    /// [`ClientError::InvalidSession`] and other failures to
    /// [`ClientError::Server`].
    pub fn into_result(self) -> Result<T> {
        if self.is_invalid_session() {
            return Err(ClientError::InvalidSession);
        }
        match self {
            ApiResponse::Success(payload) => Ok(payload),
            ApiResponse::Failure { message } => Err(ClientError::Server { message }),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        match self {
            ApiResponse::Success(payload) => ApiResponse::Success(f(payload)),
            ApiResponse::Failure { message } => ApiResponse::Failure { message },
        }
    }
}
