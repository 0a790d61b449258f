#![allow(dead_code)]

use std::sync::Arc;

use ofs_client::api::ApiClient;
use ofs_client::http::ScriptedTransport;
use ofs_client::{Client, ClientHandle, MemorySessionStore, Session};
use serde_json::{json, Value};

pub const API_BASE: &str = "http://localhost:9000";

/// A client wired to scripted replies and an in-memory store.
pub struct Harness {
    pub transport: Arc<ScriptedTransport>,
    pub store: Arc<MemorySessionStore>,
    pub client: Client,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(MemorySessionStore::new())
    }

    pub fn with_store(store: MemorySessionStore) -> Self {
        let transport = Arc::new(ScriptedTransport::new());
        let store = Arc::new(store);
        let api = ApiClient::with_transport(API_BASE, transport.clone());
        let client = Client::with_parts(api, store.clone());
        Self {
            transport,
            store,
            client,
        }
    }

    /// Log in as `alice` with session `sid-1`, listing `/` as empty.
    pub async fn logged_in() -> Self {
        let mut h = Self::new();
        h.transport
            .reply("/user/login", login_ok("sid-1"))
            .reply("/file/list", list_ok(vec![]));
        h.client.login("alice", "secret").await.unwrap();
        h
    }

    /// Move the client into an actor, keeping the transport and store.
    pub fn into_handle(self) -> (ClientHandle, Arc<ScriptedTransport>, Arc<MemorySessionStore>) {
        (ClientHandle::spawn(self.client), self.transport, self.store)
    }

    pub fn persisted(&self) -> Option<Session> {
        use ofs_client::SessionStore;
        self.store.load().unwrap()
    }
}

pub fn login_ok(session_id: &str) -> Value {
    json!({"success": true, "session_id": session_id, "username": "alice"})
}

pub fn ok() -> Value {
    json!({"success": true})
}

pub fn failure(message: &str) -> Value {
    json!({"success": false, "message": message})
}

pub fn file(name: &str, path: &str, size: u64) -> Value {
    json!({"name": name, "type": "file", "size": size, "path": path})
}

pub fn dir(name: &str, path: &str) -> Value {
    json!({"name": name, "type": "directory", "size": 0, "path": path})
}

pub fn list_ok(files: Vec<Value>) -> Value {
    json!({"success": true, "files": files})
}
