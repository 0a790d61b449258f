//! Current directory, its listing, and list-request bookkeeping.
//!
//! Every list request gets a [`ListTicket`]. A reply is applied only when
//! its ticket is the newest one issued and the path it asked for is still
//! the current path, so a slow reply for a directory the user already left
//! never overwrites the listing of the directory they are in now.

use crate::fs::{Breadcrumb, FileEntry, RemotePath};

/// State of the listing for the current path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingStatus {
    /// Nothing requested yet
    NotLoaded,
    /// A request for the current path is in flight
    Loading,
    /// The listing belongs to the current path
    Loaded { count: usize },
    /// The server rejected the session
    SessionExpired,
    /// The last request failed; the previous listing is kept
    LoadFailed { message: String },
}

/// Identifies one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTicket {
    path: RemotePath,
    generation: u64,
}

impl ListTicket {
    /// Path the request asked for.
    pub fn path(&self) -> &RemotePath {
        &self.path
    }
}

/// What happened to a list reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Listing replaced with this many entries
    Loaded(usize),
    /// Reply was for an outdated request and was dropped
    Discarded,
}

/// Path, listing and request generation.
#[derive(Debug, Clone)]
pub struct NavigationState {
    path: RemotePath,
    listing: Vec<FileEntry>,
    listing_path: Option<RemotePath>,
    status: ListingStatus,
    generation: u64,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            path: RemotePath::root(),
            listing: Vec::new(),
            listing_path: None,
            status: ListingStatus::NotLoaded,
            generation: 0,
        }
    }

    pub fn path(&self) -> &RemotePath {
        &self.path
    }

    /// Last successfully fetched listing.
    pub fn listing(&self) -> &[FileEntry] {
        &self.listing
    }

    /// Path the listing was fetched for.
    pub fn listing_path(&self) -> Option<&RemotePath> {
        self.listing_path.as_ref()
    }

    pub fn status(&self) -> &ListingStatus {
        &self.status
    }

    /// Number of entries in the listing.
    pub fn file_count(&self) -> usize {
        self.listing.len()
    }

    /// Whether the listing on display belongs to a different path than the
    /// current one (after a failed load).
    pub fn is_stale(&self) -> bool {
        self.listing_path.as_ref() != Some(&self.path)
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.path.breadcrumbs()
    }

    /// Change the current path. The listing is left alone until a reply for
    /// the new path arrives.
    pub fn set_path(&mut self, path: RemotePath) {
        self.path = path;
    }

    /// Start a list request for the current path.
    pub fn issue_ticket(&mut self) -> ListTicket {
        self.generation += 1;
        self.status = ListingStatus::Loading;
        ListTicket {
            path: self.path.clone(),
            generation: self.generation,
        }
    }

    /// Whether a reply for `ticket` may still be applied.
    pub fn is_current(&self, ticket: &ListTicket) -> bool {
        ticket.generation == self.generation && ticket.path == self.path
    }

    /// Replace the listing wholesale.
    pub fn apply_listing(&mut self, ticket: &ListTicket, files: Vec<FileEntry>) -> RefreshOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(path = %ticket.path, "discarding outdated listing");
            return RefreshOutcome::Discarded;
        }
        let count = files.len();
        self.listing = files;
        self.listing_path = Some(ticket.path.clone());
        self.status = ListingStatus::Loaded { count };
        RefreshOutcome::Loaded(count)
    }

    /// Record a failed load; the previous listing stays visible. Returns
    /// `false` if the ticket is outdated and nothing changed.
    pub fn mark_failed(&mut self, ticket: &ListTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.status = ListingStatus::LoadFailed {
            message: message.into(),
        };
        true
    }

    /// Record that the session is gone.
    pub fn mark_session_expired(&mut self) {
        self.status = ListingStatus::SessionExpired;
    }

    /// Back to `/` with no listing. Tickets issued before the reset become
    /// outdated.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.path = RemotePath::root();
        self.listing.clear();
        self.listing_path = None;
        self.status = ListingStatus::NotLoaded;
    }
}
