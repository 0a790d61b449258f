//! Transport that replays canned replies instead of talking to a server.
//!
//! Useful for offline demos and for driving the client in tests: queue JSON
//! replies per endpoint, then inspect which requests were issued.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use super::Transport;
use crate::error::{ClientError, Result};

/// One queued reply.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Respond with this JSON document
    Json(Value),
    /// Respond with a non-2xx status
    Status(u16),
    /// Fail as if the server could not be reached
    Unreachable,
}

/// A request observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Endpoint path, e.g. `/file/list`
    pub endpoint: String,
    /// Parsed JSON body (`Null` if the body was not JSON)
    pub body: Value,
}

/// In-memory [`Transport`] with per-endpoint reply queues.
///
/// Endpoints without a queued reply fail with a connection error, so a test
/// that forgets to script a call sees the same path as a dead server.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<ScriptedReply>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Strip scheme and authority from a URL, leaving the path.
fn endpoint_of(url: &str) -> String {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    match rest.find('/') {
        Some(idx) => rest[idx..].to_string(),
        None => "/".to_string(),
    }
}

impl ScriptedTransport {
    /// Create an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON reply for `endpoint`.
    pub fn reply(&self, endpoint: &str, body: Value) -> &Self {
        self.push(endpoint, ScriptedReply::Json(body))
    }

    /// Queue a connection failure for `endpoint`.
    pub fn fail(&self, endpoint: &str) -> &Self {
        self.push(endpoint, ScriptedReply::Unreachable)
    }

    /// Queue an arbitrary reply for `endpoint`.
    pub fn push(&self, endpoint: &str, reply: ScriptedReply) -> &Self {
        lock(&self.replies)
            .entry(endpoint.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Bodies of the requests sent to `endpoint`, in order.
    pub fn requests_to(&self, endpoint: &str) -> Vec<Value> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .map(|r| r.body.clone())
            .collect()
    }

    /// Number of requests seen so far.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Replies still queued across all endpoints.
    pub fn pending_replies(&self) -> usize {
        lock(&self.replies).values().map(VecDeque::len).sum()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, url: &str, body: &str) -> Result<String> {
        let endpoint = endpoint_of(url);
        lock(&self.requests).push(RecordedRequest {
            endpoint: endpoint.clone(),
            body: serde_json::from_str(body).unwrap_or(Value::Null),
        });

        let next = lock(&self.replies)
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front);

        match next {
            Some(ScriptedReply::Json(value)) => Ok(value.to_string()),
            Some(ScriptedReply::Status(code)) => Err(ClientError::HttpError(code)),
            Some(ScriptedReply::Unreachable) => {
                Err(ClientError::Connection(format!("{} unreachable", endpoint)))
            }
            None => Err(ClientError::Connection(format!(
                "no scripted reply for {}",
                endpoint
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_of() {
        assert_eq!(endpoint_of("http://localhost:9000/file/list"), "/file/list");
        assert_eq!(endpoint_of("https://host/user/login"), "/user/login");
        assert_eq!(endpoint_of("http://host"), "/");
        assert_eq!(endpoint_of("/file/read"), "/file/read");
    }

    #[tokio::test]
    async fn test_replies_are_consumed_in_order() {
        let t = ScriptedTransport::new();
        t.reply("/file/list", json!({"success": true, "files": []}))
            .fail("/file/list");

        let first = t.post("http://h/file/list", r#"{"path":"/"}"#).await.unwrap();
        assert!(first.contains("\"success\":true"));
        let second = t.post("http://h/file/list", "{}").await.unwrap_err();
        assert!(second.is_transport());
        let third = t.post("http://h/file/list", "{}").await.unwrap_err();
        assert!(third.is_transport());

        assert_eq!(t.request_count(), 3);
        assert_eq!(t.requests_to("/file/list")[0], json!({"path": "/"}));
        assert_eq!(t.pending_replies(), 0);
    }

    #[tokio::test]
    async fn test_status_reply() {
        let t = ScriptedTransport::new();
        t.push("/user/login", ScriptedReply::Status(500));
        let err = t.post("http://h/user/login", "{}").await.unwrap_err();
        assert!(matches!(err, ClientError::HttpError(500)));
    }
}
