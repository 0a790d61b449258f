//! Directory navigation and listing refresh.
//!
//! A refresh is split in three steps so the network call can run without
//! holding the client: [`Client::begin_refresh`] issues a ticket,
//! [`ListRequest::fetch`] talks to the server, and [`Client::finish_refresh`]
//! applies the reply if it is still wanted.

use crate::api::{ApiClient, ApiResponse, ListReply};
use crate::client::Client;
use crate::error::Result;
use crate::fs::{filter_entries, Breadcrumb, FileEntry, RemotePath};
use crate::navigation::{ListTicket, RefreshOutcome};

/// Shown when a listing could not be loaded.
pub(crate) const LOAD_ERROR: &str = "Error loading files";

/// A list request that has been issued but not sent.
#[derive(Debug, Clone)]
pub struct ListRequest {
    ticket: ListTicket,
    session_id: String,
}

/// A list request together with what the server said.
#[derive(Debug)]
pub struct ListResponse {
    request: ListRequest,
    result: Result<ApiResponse<ListReply>>,
}

impl ListRequest {
    /// Directory being listed.
    pub fn path(&self) -> &RemotePath {
        self.ticket.path()
    }

    pub async fn fetch(self, api: &ApiClient) -> ListResponse {
        let result = api.list(self.path().as_str(), &self.session_id).await;
        ListResponse {
            request: self,
            result,
        }
    }
}

impl ListResponse {
    pub fn path(&self) -> &RemotePath {
        self.request.path()
    }
}

impl Client {
    /// Issue a list request for the current path.
    pub fn begin_refresh(&mut self) -> Result<ListRequest> {
        let session_id = self.require_session()?;
        let ticket = self.state.nav.issue_ticket();
        tracing::debug!(path = %ticket.path(), "refreshing listing");
        Ok(ListRequest { ticket, session_id })
    }

    /// Change the current path and issue a list request for it. The filter
    /// query is cleared.
    pub fn begin_navigation(&mut self, path: &str) -> Result<ListRequest> {
        self.state.nav.set_path(RemotePath::new(path));
        self.state.query.clear();
        self.begin_refresh()
    }

    /// Apply a list reply.
    ///
    /// Replies for an outdated request are dropped with
    /// [`RefreshOutcome::Discarded`]. An invalid-session reply tears the
    /// session down as long as it was issued under the current session.
    pub fn finish_refresh(&mut self, response: ListResponse) -> Result<RefreshOutcome> {
        let ListResponse { request, result } = response;
        let ticket = request.ticket;

        let err = match result.and_then(ApiResponse::into_result) {
            Ok(reply) => return Ok(self.state.nav.apply_listing(&ticket, reply.files)),
            Err(e) => e,
        };

        if err.is_invalid_session() {
            if self.state.session_id() == Some(request.session_id.as_str()) {
                self.on_invalid_session();
                return Err(err);
            }
            return Ok(RefreshOutcome::Discarded);
        }

        if !self.state.nav.mark_failed(&ticket, LOAD_ERROR) {
            tracing::debug!(path = %ticket.path(), "ignoring failure of outdated listing request");
            return Ok(RefreshOutcome::Discarded);
        }
        tracing::warn!(path = %ticket.path(), "listing failed: {}", err);
        Err(err)
    }

    /// Fetch the listing of the current path.
    ///
    /// Without a session this only marks the listing as expired and returns
    /// [`ClientError::NotAuthenticated`](crate::ClientError::NotAuthenticated).
    pub async fn refresh_listing(&mut self) -> Result<RefreshOutcome> {
        let request = self.begin_refresh()?;
        let response = request.fetch(&self.api).await;
        self.finish_refresh(response)
    }

    /// Go to `path` and load its listing. No existence check is made; a
    /// missing directory shows up as a failed load.
    pub async fn navigate_to(&mut self, path: &str) -> Result<RefreshOutcome> {
        let request = self.begin_navigation(path)?;
        let response = request.fetch(&self.api).await;
        self.finish_refresh(response)
    }

    /// Go to the parent directory; `/` stays `/`.
    pub async fn navigate_up(&mut self) -> Result<RefreshOutcome> {
        let parent = self.state.nav.path().parent();
        self.navigate_to(parent.as_str()).await
    }

    /// Directories are entered, files are previewed.
    pub async fn open(&mut self, entry: &FileEntry) -> Result<()> {
        if entry.is_directory() {
            self.navigate_to(&entry.path).await.map(|_| ())
        } else {
            self.view_file(entry).await
        }
    }

    pub fn set_filter(&mut self, query: &str) {
        self.state.query = query.to_string();
    }

    /// Current listing narrowed by the filter query.
    pub fn filter(&self) -> Vec<FileEntry> {
        filter_entries(self.state.nav.listing(), &self.state.query)
    }

    pub fn breadcrumb_segments(&self) -> Vec<Breadcrumb> {
        self.state.nav.breadcrumbs()
    }

    /// Entries of the current listing, unfiltered.
    pub fn listing(&self) -> &[FileEntry] {
        self.state.nav.listing()
    }

    pub fn current_path(&self) -> &RemotePath {
        self.state.nav.path()
    }
}

