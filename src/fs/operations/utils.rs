//! Shared helpers for filesystem operations.

use crate::client::Client;
use crate::error::{ClientError, Result};

/// Trim `name` and reject it with `empty_message` if nothing is left.
pub(crate) fn validate_name(name: &str, empty_message: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ClientError::Validation(empty_message.to_string()));
    }
    Ok(name.to_string())
}

impl Client {
    /// Report a failed operation and hand the error back.
    ///
    /// An invalid session tears the session down; anything else becomes an
    /// error toast, using `fallback` when the server sent no message.
    pub(crate) fn fail(&mut self, err: ClientError, fallback: &str) -> ClientError {
        if err.is_invalid_session() {
            self.on_invalid_session();
        } else {
            self.state.toast_error(err.user_message(fallback));
        }
        err
    }

    /// Refresh as a follow-up to login or a mutation. The outcome lands in
    /// the listing status.
    pub(crate) async fn refresh_and_record(&mut self) {
        if let Err(e) = self.refresh_listing().await {
            tracing::debug!("follow-up refresh failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  notes.txt ", "empty").unwrap(), "notes.txt");
        let err = validate_name("   ", "Please enter a file name").unwrap_err();
        assert!(matches!(err, ClientError::Validation(ref m) if m == "Please enter a file name"));
        assert!(validate_name("", "x").is_err());
    }
}
