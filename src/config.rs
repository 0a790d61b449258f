//! Client configuration.
//!
//! Defaults target a server on `localhost:9000`. Values can come from a JSON
//! file ([`ClientConfig::load`]) and be overridden from the environment
//! ([`ClientConfig::apply_env`]).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "http://localhost:9000";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

const ENV_API_BASE: &str = "OFS_API_BASE";
const ENV_TIMEOUT: &str = "OFS_TIMEOUT_SECS";
const ENV_PROXY: &str = "OFS_PROXY";
const ENV_SESSION_FILE: &str = "OFS_SESSION_FILE";

/// Connection and persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL all endpoints are appended to
    pub api_base: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Optional HTTP/SOCKS proxy URL
    pub proxy: Option<String>,
    /// Where the persisted session lives
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy: None,
            session_file: default_session_file(),
        }
    }
}

/// `<config dir>/ofs-client/session.json`, falling back to the working directory.
pub fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("ofs-client")
        .join("session.json")
}

impl ClientConfig {
    /// Load configuration from a JSON file. A missing file yields defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Storage(format!("Read error: {}", e)))?;
        let config: Self = serde_json::from_str(&json)?;
        Ok(config.normalized())
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply overrides from a variable lookup (normally `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            self.api_base = base.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.request_timeout_secs = secs,
                _ => tracing::warn!("ignoring invalid {}={:?}", ENV_TIMEOUT, raw),
            }
        }
        if let Some(proxy) = lookup(ENV_PROXY) {
            let proxy = proxy.trim();
            self.proxy = if proxy.is_empty() {
                None
            } else {
                Some(proxy.to_string())
            };
        }
        if let Some(file) = lookup(ENV_SESSION_FILE).filter(|v| !v.trim().is_empty()) {
            self.session_file = PathBuf::from(file.trim());
        }
        let api_base = trim_base(&self.api_base);
        self.api_base = api_base;
    }

    /// Use a different API base.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = trim_base(&api_base.into());
        self
    }

    /// Use a proxy for all requests.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Persist the session somewhere else.
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Full URL for an endpoint such as `/file/list`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", trim_base(&self.api_base), endpoint)
    }

    fn normalized(mut self) -> Self {
        self.api_base = trim_base(&self.api_base);
        self
    }
}

fn trim_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "http://localhost:9000");
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        assert!(config.proxy.is_none());
        assert!(config.session_file.ends_with("ofs-client/session.json"));
    }

    #[test]
    fn test_endpoint_url_has_single_slash() {
        let config = ClientConfig::default().with_api_base("http://example.com:9000/");
        assert_eq!(
            config.endpoint_url("/file/list"),
            "http://example.com:9000/file/list"
        );
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("OFS_API_BASE", "http://10.0.0.2:9000/"),
            ("OFS_TIMEOUT_SECS", "5"),
            ("OFS_PROXY", "socks5://127.0.0.1:1080"),
            ("OFS_SESSION_FILE", "/tmp/ofs-session.json"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config.apply_env(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_base, "http://10.0.0.2:9000");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.proxy.as_deref(), Some("socks5://127.0.0.1:1080"));
        assert_eq!(config.session_file, PathBuf::from("/tmp/ofs-session.json"));
    }

    #[test]
    fn test_invalid_timeout_is_ignored() {
        let mut config = ClientConfig::default();
        config.apply_env(|k| (k == "OFS_TIMEOUT_SECS").then(|| "soon".to_string()));
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_missing_and_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ClientConfig::load(dir.path().join("nope.json")).unwrap();
        assert_eq!(missing, ClientConfig::default());

        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_base":"http://files.local/"}"#).unwrap();
        let loaded = ClientConfig::load(&path).unwrap();
        assert_eq!(loaded.api_base, "http://files.local");
        assert_eq!(loaded.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
