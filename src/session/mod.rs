//! Authentication session and its persistence.

mod auth;
pub mod store;

use std::fmt;

pub use auth::{validate_login, validate_signup};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, SESSION_KEY, USER_KEY};

/// An authenticated session: the username and the server-issued id.
///
/// Both fields are always present; "no session" is `Option::<Session>::None`.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    session_id: String,
}

impl Session {
    pub fn new(username: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            session_id: session_id.into(),
        }
    }

    /// Build a session from possibly-missing parts. Returns `None` unless
    /// both are present and non-empty.
    pub fn from_parts(username: Option<String>, session_id: Option<String>) -> Option<Self> {
        match (username, session_id) {
            (Some(u), Some(s)) if !u.is_empty() && !s.is_empty() => Some(Self::new(u, s)),
            _ => None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

// Session ids are credentials; keep them out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("session_id", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_requires_both() {
        assert!(Session::from_parts(Some("a".into()), Some("s".into())).is_some());
        assert!(Session::from_parts(Some("a".into()), None).is_none());
        assert!(Session::from_parts(None, Some("s".into())).is_none());
        assert!(Session::from_parts(Some("".into()), Some("s".into())).is_none());
        assert!(Session::from_parts(None, None).is_none());
    }

    #[test]
    fn test_debug_hides_session_id() {
        let s = Session::new("alice", "secret-sid");
        let printed = format!("{:?}", s);
        assert!(printed.contains("alice"));
        assert!(!printed.contains("secret-sid"));
    }
}
