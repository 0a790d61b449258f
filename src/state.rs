//! Application state owned by a [`Client`](crate::Client).
//!
//! One explicit struct instead of ambient globals: the session, the
//! navigation state, the file open for preview or edit, the screen, the open
//! form, the filter query and the last notice. Logout and session
//! invalidation go through [`AppState::teardown`].

use crate::fs::FileEntry;
use crate::navigation::NavigationState;
use crate::session::Session;

/// Which top-level view is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Anonymous entry screen
    #[default]
    Login,
    /// Account creation form
    Signup,
    /// File browser, requires a session
    Dashboard,
}

/// A modal form on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form {
    CreateFile,
    CreateDirectory,
    /// Editing the active file; `draft` starts as the loaded content
    EditFile { draft: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// Where a notice is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTarget {
    /// Inline on the login form
    Login,
    /// Inline on the signup form
    Signup,
    /// Transient dashboard message
    Toast,
}

/// A user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub target: NoticeTarget,
    pub text: String,
}

/// The file selected for preview or edit, with its loaded content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFile {
    pub entry: FileEntry,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub(crate) session: Option<Session>,
    pub(crate) nav: NavigationState,
    pub(crate) active_file: Option<ActiveFile>,
    pub(crate) screen: Screen,
    pub(crate) form: Option<Form>,
    pub(crate) notice: Option<Notice>,
    pub(crate) query: String,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(Session::username)
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(Session::session_id)
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn active_file(&self) -> Option<&ActiveFile> {
        self.active_file.as_ref()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub(crate) fn notify(&mut self, level: NoticeLevel, target: NoticeTarget, text: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            target,
            text: text.into(),
        });
    }

    pub(crate) fn toast_success(&mut self, text: impl Into<String>) {
        self.notify(NoticeLevel::Success, NoticeTarget::Toast, text);
    }

    pub(crate) fn toast_error(&mut self, text: impl Into<String>) {
        self.notify(NoticeLevel::Error, NoticeTarget::Toast, text);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Install a fresh session and switch to the dashboard at `/`.
    pub(crate) fn enter_dashboard(&mut self, session: Session) {
        self.teardown();
        self.session = Some(session);
        self.screen = Screen::Dashboard;
    }

    /// Drop everything tied to the session: path back to `/`, listing,
    /// active file, form and query cleared. The notice is left for the
    /// caller to set.
    pub(crate) fn teardown(&mut self) {
        self.session = None;
        self.nav.reset();
        self.active_file = None;
        self.form = None;
        self.query.clear();
        self.screen = Screen::Login;
    }
}
