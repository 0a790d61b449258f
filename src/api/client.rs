//! Typed client for the file server's JSON-over-POST API.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::endpoints;
use super::types::{
    Ack, ApiResponse, ContentRequest, CredentialsRequest, ListReply, LoginReply, PathRequest,
    ReadReply, SessionInfo, SessionRequest,
};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, Transport};

/// File server API client.
///
/// Every call returns `Ok(ApiResponse)` when the server answered, whatever
/// the `success` flag says, and `Err` only for transport or decoding
/// failures. Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    api_base: String,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a reqwest-backed client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = HttpClient::from_config(config)?;
        Ok(Self::with_transport(&config.api_base, Arc::new(http)))
    }

    /// Create a client over any transport.
    pub fn with_transport(api_base: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn call<B, T>(&self, endpoint: &str, body: &B) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.api_base, endpoint);
        let body = serde_json::to_string(body)?;

        tracing::debug!(endpoint, "api request");
        let text = match self.transport.post(&url, &body).await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(endpoint, error = %e, "api request failed");
                return Err(e);
            }
        };
        tracing::debug!(endpoint, bytes = text.len(), "api response");

        let response = ApiResponse::parse(&text)?;
        if let Some(message) = response.message() {
            tracing::debug!(endpoint, message, "api failure reply");
        }
        Ok(response)
    }

    /// `POST /user/signup`.
    pub async fn signup(&self, username: &str, password: &str) -> Result<ApiResponse<Ack>> {
        self.call(endpoints::SIGNUP, &CredentialsRequest { username, password })
            .await
    }

    /// `POST /user/login`.
    pub async fn login(&self, username: &str, password: &str) -> Result<ApiResponse<LoginReply>> {
        self.call(endpoints::LOGIN, &CredentialsRequest { username, password })
            .await
    }

    /// `POST /user/session`: ask whether `session_id` is still valid.
    pub async fn check_session(&self, session_id: &str) -> Result<ApiResponse<SessionInfo>> {
        self.call(endpoints::SESSION, &SessionRequest { session_id })
            .await
    }

    /// `POST /user/logout`.
    pub async fn logout(&self, session_id: &str) -> Result<ApiResponse<Ack>> {
        self.call(endpoints::LOGOUT, &SessionRequest { session_id })
            .await
    }

    /// `POST /file/list`: entries directly inside `path`.
    pub async fn list(&self, path: &str, session_id: &str) -> Result<ApiResponse<ListReply>> {
        self.call(endpoints::FILE_LIST, &PathRequest { path, session_id })
            .await
    }

    /// `POST /file/read`.
    pub async fn read_file(&self, path: &str, session_id: &str) -> Result<ApiResponse<ReadReply>> {
        self.call(endpoints::FILE_READ, &PathRequest { path, session_id })
            .await
    }

    /// `POST /file/create`.
    pub async fn create_file(
        &self,
        path: &str,
        content: &str,
        session_id: &str,
    ) -> Result<ApiResponse<Ack>> {
        self.call(
            endpoints::FILE_CREATE,
            &ContentRequest {
                path,
                content,
                session_id,
            },
        )
        .await
    }

    /// `POST /file/edit`: replace the content of an existing file.
    pub async fn edit_file(
        &self,
        path: &str,
        content: &str,
        session_id: &str,
    ) -> Result<ApiResponse<Ack>> {
        self.call(
            endpoints::FILE_EDIT,
            &ContentRequest {
                path,
                content,
                session_id,
            },
        )
        .await
    }

    /// `POST /file/delete`.
    pub async fn delete_file(&self, path: &str, session_id: &str) -> Result<ApiResponse<Ack>> {
        self.call(endpoints::FILE_DELETE, &PathRequest { path, session_id })
            .await
    }

    /// `POST /directory/create`.
    pub async fn create_directory(&self, path: &str, session_id: &str) -> Result<ApiResponse<Ack>> {
        self.call(endpoints::DIRECTORY_CREATE, &PathRequest { path, session_id })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ScriptedTransport;
    use serde_json::json;

    fn scripted() -> (Arc<ScriptedTransport>, ApiClient) {
        let transport = Arc::new(ScriptedTransport::new());
        let client = ApiClient::with_transport("http://localhost:9000/", transport.clone());
        (transport, client)
    }

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(&ClientConfig::default()).unwrap();
        assert_eq!(client.api_base(), "http://localhost:9000");
    }

    #[tokio::test]
    async fn test_login_sends_credentials() {
        let (t, client) = scripted();
        t.reply(
            "/user/login",
            json!({"success": true, "session_id": "abc", "username": "alice"}),
        );

        let reply = client.login("alice", "pw").await.unwrap().into_result().unwrap();
        assert_eq!(reply.session_id.as_deref(), Some("abc"));
        assert_eq!(
            t.requests_to("/user/login"),
            vec![json!({"username": "alice", "password": "pw"})]
        );
    }

    #[tokio::test]
    async fn test_path_requests_carry_session() {
        let (t, client) = scripted();
        t.reply("/file/list", json!({"success": true, "files": []}))
            .reply("/file/read", json!({"success": true, "content": "x"}))
            .reply("/file/create", json!({"success": true}))
            .reply("/file/edit", json!({"success": true}))
            .reply("/file/delete", json!({"success": true}))
            .reply("/directory/create", json!({"success": true}));

        client.list("/", "s").await.unwrap();
        let read = client.read_file("/a", "s").await.unwrap().into_result().unwrap();
        assert_eq!(read.content, "x");
        client.create_file("/a", "1", "s").await.unwrap();
        client.edit_file("/a", "2", "s").await.unwrap();
        client.delete_file("/a", "s").await.unwrap();
        client.create_directory("/d", "s").await.unwrap();

        let endpoints: Vec<String> = t.requests().into_iter().map(|r| r.endpoint).collect();
        assert_eq!(
            endpoints,
            vec![
                "/file/list",
                "/file/read",
                "/file/create",
                "/file/edit",
                "/file/delete",
                "/directory/create"
            ]
        );
        for req in t.requests() {
            assert_eq!(req.body["session_id"], "s");
        }
        assert_eq!(t.requests_to("/file/edit")[0]["content"], "2");
    }

    #[tokio::test]
    async fn test_transport_error_is_err() {
        let (t, client) = scripted();
        t.fail("/user/session");
        let err = client.check_session("sid").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_failure_reply_is_ok_response() {
        let (t, client) = scripted();
        t.reply("/file/list", json!({"success": false, "message": "Invalid session"}));
        let resp = client.list("/", "stale").await.unwrap();
        assert!(resp.is_invalid_session());
    }
}
