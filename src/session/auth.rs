//! Login, signup, logout and session revalidation.

use super::Session;
use crate::client::Client;
use crate::error::{ClientError, Result, CONNECTION_ERROR};
use crate::api::ApiResponse;
use crate::state::{NoticeLevel, NoticeTarget, Screen};

/// Shown when a session is torn down by the server.
pub(crate) const SESSION_EXPIRED: &str = "Session expired, please login again";

/// Local checks before a login request.
pub fn validate_login(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ClientError::Validation(
            "Please enter both username and password".to_string(),
        ));
    }
    Ok(())
}

/// Local checks before a signup request, in the order they are reported.
pub fn validate_signup(username: &str, password: &str, confirm: &str) -> Result<()> {
    let len = username.chars().count();
    if !(3..=31).contains(&len) {
        return Err(ClientError::Validation(
            "Username must be 3-31 characters".to_string(),
        ));
    }
    if password.chars().count() < 4 {
        return Err(ClientError::Validation(
            "Password must be at least 4 characters".to_string(),
        ));
    }
    if password != confirm {
        return Err(ClientError::Validation("Passwords do not match".to_string()));
    }
    Ok(())
}

impl Client {
    /// Revalidate the persisted session, if any.
    ///
    /// Returns `Ok(true)` when the session was accepted and the dashboard is
    /// shown. Otherwise the client ends up anonymous on the login screen,
    /// whatever session it held before, and a rejected or unverifiable
    /// session is erased from the store.
    pub async fn restore(&mut self) -> Result<bool> {
        let saved = match self.store.load() {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("could not read persisted session: {}", e);
                self.forget_persisted();
                None
            }
        };
        let Some(saved) = saved else {
            tracing::debug!("no persisted session");
            self.state.teardown();
            return Ok(false);
        };

        let info = match self.api.check_session(saved.session_id()).await {
            Ok(ApiResponse::Success(info)) => info,
            Ok(ApiResponse::Failure { message }) => {
                tracing::info!(
                    "persisted session rejected: {}",
                    message.as_deref().unwrap_or("no message")
                );
                self.forget_persisted();
                self.state.teardown();
                return Ok(false);
            }
            Err(e) => {
                tracing::warn!("could not revalidate session: {}", e);
                self.forget_persisted();
                self.state.teardown();
                return Ok(false);
            }
        };

        let username = info
            .username
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| saved.username().to_string());
        let session = Session::new(username, saved.session_id());
        self.persist(&session);
        tracing::info!(user = session.username(), "session restored");
        self.state.enter_dashboard(session);
        self.refresh_and_record().await;
        Ok(true)
    }

    /// Log in and open the dashboard at `/`.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if let Err(e) = validate_login(username, password) {
            self.login_error(e.user_message("Login failed"));
            return Err(e);
        }
        let username = username.trim();

        let reply = match self.api.login(username, password).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("login request failed: {}", e);
                self.login_error(CONNECTION_ERROR);
                return Err(e);
            }
        };

        let session_id = match reply {
            ApiResponse::Success(reply) => reply.session_id.filter(|s| !s.is_empty()),
            ApiResponse::Failure { message } => {
                let err = ClientError::Server { message };
                self.login_error(err.user_message("Login failed"));
                return Err(err);
            }
        };
        let Some(session_id) = session_id else {
            self.login_error("Login failed");
            return Err(ClientError::InvalidResponse);
        };

        let session = Session::new(username, session_id);
        self.persist(&session);
        tracing::info!(user = username, "logged in");
        self.state.enter_dashboard(session);
        self.state.toast_success("Login successful!");
        self.refresh_and_record().await;
        Ok(())
    }

    /// Create an account. On success the login screen is shown; no session
    /// is created.
    pub async fn signup(&mut self, username: &str, password: &str, confirm: &str) -> Result<()> {
        if let Err(e) = validate_signup(username, password, confirm) {
            self.signup_error(e.user_message("Signup failed"));
            return Err(e);
        }

        match self.api.signup(username, password).await {
            Ok(ApiResponse::Success(_)) => {
                tracing::info!(user = username, "account created");
                self.state.screen = Screen::Login;
                self.state.notify(
                    NoticeLevel::Success,
                    NoticeTarget::Login,
                    "Account created! Please login.",
                );
                Ok(())
            }
            Ok(ApiResponse::Failure { message }) => {
                let err = ClientError::Server { message };
                self.signup_error(err.user_message("Signup failed"));
                Err(err)
            }
            Err(e) => {
                tracing::warn!("signup request failed: {}", e);
                self.signup_error(CONNECTION_ERROR);
                Err(e)
            }
        }
    }

    /// Log out. Always succeeds locally; the server is told on a best-effort
    /// basis.
    pub async fn logout(&mut self) {
        if let Some(session) = self.state.session.clone() {
            match self.api.logout(session.session_id()).await {
                Ok(ApiResponse::Success(_)) => {}
                Ok(ApiResponse::Failure { message }) => {
                    tracing::warn!(
                        "server refused logout: {}",
                        message.as_deref().unwrap_or("no message")
                    );
                }
                Err(e) => tracing::warn!("logout request failed: {}", e),
            }
            tracing::info!(user = session.username(), "logged out");
        }
        self.forget_persisted();
        self.state.teardown();
        self.state.clear_notice();
    }

    /// Flip between the login and signup screens.
    pub fn toggle_signup(&mut self) {
        self.state.screen = match self.state.screen {
            Screen::Signup => Screen::Login,
            Screen::Login => Screen::Signup,
            Screen::Dashboard => return,
        };
        self.state.clear_notice();
    }

    /// Tear down after the server rejected the session.
    pub(crate) fn on_invalid_session(&mut self) {
        if let Some(session) = self.state.session() {
            tracing::warn!(user = session.username(), "session invalidated by server");
        }
        self.forget_persisted();
        self.state.teardown();
        self.state.nav.mark_session_expired();
        self.state
            .notify(NoticeLevel::Error, NoticeTarget::Login, SESSION_EXPIRED);
    }

    /// Session id of the active session.
    pub(crate) fn require_session(&mut self) -> Result<String> {
        match self.state.session_id() {
            Some(id) => Ok(id.to_string()),
            None => {
                self.state.nav.mark_session_expired();
                Err(ClientError::NotAuthenticated)
            }
        }
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = self.store.save(session) {
            tracing::warn!("failed to persist session: {}", e);
        }
    }

    fn forget_persisted(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("failed to clear persisted session: {}", e);
        }
    }

    fn login_error(&mut self, text: impl Into<String>) {
        self.state
            .notify(NoticeLevel::Error, NoticeTarget::Login, text);
    }

    fn signup_error(&mut self, text: impl Into<String>) {
        self.state
            .notify(NoticeLevel::Error, NoticeTarget::Signup, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_login() {
        assert!(validate_login("alice", "pw").is_ok());
        let err = validate_login("alice", "").unwrap_err();
        assert_eq!(err.to_string(), "Please enter both username and password");
        assert!(validate_login("   ", "pw").is_err());
    }

    #[test]
    fn test_validate_signup_order() {
        assert_eq!(
            validate_signup("ab", "x", "y").unwrap_err().to_string(),
            "Username must be 3-31 characters"
        );
        assert_eq!(
            validate_signup(&"a".repeat(32), "pass", "pass").unwrap_err().to_string(),
            "Username must be 3-31 characters"
        );
        assert_eq!(
            validate_signup("abc", "abc", "abc").unwrap_err().to_string(),
            "Password must be at least 4 characters"
        );
        assert_eq!(
            validate_signup("abc", "abcd", "abce").unwrap_err().to_string(),
            "Passwords do not match"
        );
        assert!(validate_signup("abc", "abcd", "abcd").is_ok());
        assert!(validate_signup(&"a".repeat(31), "abcd", "abcd").is_ok());
    }
}
