//! The client: API access, session storage and application state.
//!
//! `Client` is driven one operation at a time. Its methods are spread over
//! several modules:
//!
//! - `session::auth`: restore, login, signup, logout
//! - `fs::operations::browse`: navigation, listing refresh, filter
//! - `fs::operations::file_ops`: preview, create, edit, delete
//! - `fs::operations::dir_ops`: folder creation
//!
//! For concurrent use from a UI, wrap it in a
//! [`ClientHandle`](crate::ClientHandle).

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::session::{FileSessionStore, SessionStore};
use crate::snapshot::Snapshot;
use crate::state::AppState;

pub struct Client {
    pub(crate) api: ApiClient,
    pub(crate) store: Arc<dyn SessionStore>,
    pub(crate) state: AppState,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api", &self.api)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// HTTP client with the session persisted to `config.session_file`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api = ApiClient::new(config)?;
        let store = Arc::new(FileSessionStore::new(&config.session_file));
        Ok(Self::with_parts(api, store))
    }

    /// Client over an explicit API client and store.
    pub fn with_parts(api: ApiClient, store: Arc<dyn SessionStore>) -> Self {
        Self::with_state(api, store, AppState::new())
    }

    pub fn with_state(api: ApiClient, store: Arc<dyn SessionStore>, state: AppState) -> Self {
        Self { api, store, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Current state, ready to render.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_state(&self.state)
    }

    /// Dismiss the current notice.
    pub fn clear_notice(&mut self) {
        self.state.clear_notice();
    }
}
