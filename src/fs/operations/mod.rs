//! Filesystem operations split into focused modules.

mod browse;
mod dir_ops;
mod file_ops;
mod utils;

pub use browse::{ListRequest, ListResponse};
