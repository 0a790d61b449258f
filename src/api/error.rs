//! Known server failure messages.
//!
//! The server reports failures as `{"success": false, "message": "..."}`.
//! The messages below are the ones the client reacts to; anything else is
//! [`ServerMessage::Other`] and is shown to the user as-is.

/// Classified server failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMessage {
    /// Session id unknown or expired
    InvalidSession,
    /// Request carried no session id
    NoSession,
    /// Username or password missing
    MissingCredentials,
    /// Account already has an active session
    AlreadyLoggedIn,
    /// Wrong username or password
    BadCredentials,
    /// Signup with a taken username
    UsernameTaken,
    /// Path field missing
    NoPath,
    /// Endpoint not served
    UnknownEndpoint,
    /// Anything else
    Other,
}

impl From<&str> for ServerMessage {
    fn from(message: &str) -> Self {
        match message.trim().to_ascii_lowercase().as_str() {
            "invalid session" => ServerMessage::InvalidSession,
            "no session" => ServerMessage::NoSession,
            "missing credentials" => ServerMessage::MissingCredentials,
            "user already logged in" => ServerMessage::AlreadyLoggedIn,
            "invalid username or password" => ServerMessage::BadCredentials,
            "username already exists" => ServerMessage::UsernameTaken,
            "no path specified" => ServerMessage::NoPath,
            "unknown endpoint" => ServerMessage::UnknownEndpoint,
            _ => ServerMessage::Other,
        }
    }
}

impl ServerMessage {
    /// Get human-readable description of the message kind.
    pub fn description(&self) -> &'static str {
        match self {
            ServerMessage::InvalidSession => "Invalid session",
            ServerMessage::NoSession => "No session",
            ServerMessage::MissingCredentials => "Missing credentials",
            ServerMessage::AlreadyLoggedIn => "User already logged in",
            ServerMessage::BadCredentials => "Invalid username or password",
            ServerMessage::UsernameTaken => "Username already exists",
            ServerMessage::NoPath => "No path specified",
            ServerMessage::UnknownEndpoint => "Unknown endpoint",
            ServerMessage::Other => "Request failed",
        }
    }

    /// Whether the message means the session id is no longer usable.
    pub fn is_session_error(&self) -> bool {
        matches!(self, ServerMessage::InvalidSession | ServerMessage::NoSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_classification() {
        assert_eq!(ServerMessage::from("Invalid session"), ServerMessage::InvalidSession);
        assert_eq!(ServerMessage::from("  invalid SESSION "), ServerMessage::InvalidSession);
        assert_eq!(ServerMessage::from("No session"), ServerMessage::NoSession);
        assert_eq!(
            ServerMessage::from("Invalid username or password"),
            ServerMessage::BadCredentials
        );
        assert_eq!(
            ServerMessage::from("Username already exists"),
            ServerMessage::UsernameTaken
        );
        assert_eq!(ServerMessage::from("File not found"), ServerMessage::Other);
    }

    #[test]
    fn test_session_errors() {
        assert!(ServerMessage::InvalidSession.is_session_error());
        assert!(ServerMessage::NoSession.is_session_error());
        assert!(!ServerMessage::BadCredentials.is_session_error());
        assert!(!ServerMessage::Other.is_session_error());
    }

    #[test]
    fn test_descriptions_round_trip() {
        for kind in [
            ServerMessage::InvalidSession,
            ServerMessage::NoSession,
            ServerMessage::MissingCredentials,
            ServerMessage::AlreadyLoggedIn,
            ServerMessage::BadCredentials,
            ServerMessage::UsernameTaken,
            ServerMessage::NoPath,
            ServerMessage::UnknownEndpoint,
        ] {
            assert_eq!(ServerMessage::from(kind.description()), kind);
        }
    }
}
