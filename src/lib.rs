//! # ofs_client
//!
//! Client library for a remote hierarchical file-storage service spoken to
//! over a small JSON-over-POST API.
//!
//! ## Features
//!
//! - **Sessions**: login, signup, logout, and revalidation of a persisted
//!   session on startup. A session the server rejects is torn down
//!   everywhere, including on disk.
//! - **Browsing**: navigate directories, breadcrumbs, case-insensitive name
//!   filter over the current listing. Replies for a directory the user has
//!   already left are dropped.
//! - **Files and folders**: preview, create, edit and delete files, create
//!   folders. Every mutation finishes before the listing refresh it
//!   triggers.
//! - **UI boundary**: every state change is readable as an owned
//!   [`Snapshot`], published on a watch channel by [`ClientHandle`].
//!
//! ## Example: Basic Usage
//!
//! ```no_run
//! use ofs_client::{ClientConfig, ClientHandle};
//!
//! # async fn example() -> ofs_client::Result<()> {
//! let handle = ClientHandle::connect(&ClientConfig::from_env()).await?;
//! if !handle.snapshot().is_authenticated() {
//!     handle.login("alice", "secret").await?;
//! }
//!
//! handle.navigate_to("/docs").await?;
//! for entry in handle.snapshot().entries {
//!     println!("{} {}", entry.name, entry.display_size().unwrap_or_default());
//! }
//!
//! handle.create_file("notes.txt", "hello").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Without the actor
//!
//! [`Client`] can be driven directly when nothing else needs the state:
//!
//! ```no_run
//! use ofs_client::{Client, ClientConfig};
//!
//! # async fn example() -> ofs_client::Result<()> {
//! let mut client = Client::new(&ClientConfig::default())?;
//! client.login("alice", "secret").await?;
//! client.set_filter("report");
//! println!("{} matches", client.filter().len());
//! client.logout().await;
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod fs;
pub mod http;
pub mod navigation;
pub mod session;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use actor::ClientHandle;
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use fs::{format_size, Breadcrumb, EntryType, FileEntry, RemotePath};
pub use navigation::{ListingStatus, RefreshOutcome};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
pub use snapshot::{ListingView, Preview, Snapshot, EMPTY_FILE_MARKER};
pub use state::{ActiveFile, AppState, Form, Notice, NoticeLevel, NoticeTarget, Screen};
