//! Remote filesystem model and operations.

pub(crate) mod entry;
pub(crate) mod filter;
pub(crate) mod path;
mod operations;

pub use entry::{format_size, EntryType, FileEntry};
pub use filter::filter_entries;
pub use operations::{ListRequest, ListResponse};
pub use path::{Breadcrumb, RemotePath};
