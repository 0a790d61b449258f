//! Owned view of [`AppState`] handed to renderers.

use crate::fs::{filter_entries, format_size, Breadcrumb, FileEntry};
use crate::navigation::ListingStatus;
use crate::state::{AppState, Form, Notice, Screen};

/// Shown in place of the content of an empty file.
pub const EMPTY_FILE_MARKER: &str = "(Empty file)";

/// How the listing area should be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListingView {
    #[default]
    NotLoaded,
    Loading,
    /// At least one entry
    Loaded { count: usize },
    /// The directory has no entries
    Empty,
    /// The session was rejected; nothing is listed
    SessionExpired,
    /// The last load failed. `stale` is set when an earlier listing is still
    /// on display.
    LoadFailed { message: String, stale: bool },
}

/// The file preview pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub name: String,
    pub path: String,
    pub size: String,
    /// Content, or [`EMPTY_FILE_MARKER`] when the file is empty
    pub text: String,
    pub is_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub screen: Screen,
    pub username: Option<String>,
    pub path: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Listing after the filter query
    pub entries: Vec<FileEntry>,
    /// Size of the unfiltered listing
    pub file_count: usize,
    pub listing: ListingView,
    pub query: String,
    pub preview: Option<Preview>,
    pub form: Option<Form>,
    pub notice: Option<Notice>,
}

impl Snapshot {
    pub fn from_state(state: &AppState) -> Self {
        let nav = state.nav();

        let listing = match nav.status() {
            ListingStatus::NotLoaded => ListingView::NotLoaded,
            ListingStatus::Loading => ListingView::Loading,
            ListingStatus::Loaded { count: 0 } => ListingView::Empty,
            ListingStatus::Loaded { count } => ListingView::Loaded { count: *count },
            ListingStatus::SessionExpired => ListingView::SessionExpired,
            ListingStatus::LoadFailed { message } => ListingView::LoadFailed {
                message: message.clone(),
                stale: nav.listing_path().is_some(),
            },
        };

        // The edit form replaces the preview pane.
        let editing = matches!(state.form(), Some(Form::EditFile { .. }));
        let preview = state.active_file().filter(|_| !editing).map(|file| {
            let is_empty = file.content.is_empty();
            Preview {
                name: file.entry.name.clone(),
                path: file.entry.path.clone(),
                size: format_size(file.entry.size),
                text: if is_empty {
                    EMPTY_FILE_MARKER.to_string()
                } else {
                    file.content.clone()
                },
                is_empty,
            }
        });

        Self {
            screen: state.screen(),
            username: state.username().map(str::to_string),
            path: nav.path().to_string(),
            breadcrumbs: nav.breadcrumbs(),
            entries: filter_entries(nav.listing(), state.query()),
            file_count: nav.file_count(),
            listing,
            query: state.query().to_string(),
            preview,
            form: state.form().cloned(),
            notice: state.notice().cloned(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }
}
