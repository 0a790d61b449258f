//! File server API client and wire types.

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ServerMessage;
pub use types::{Ack, ApiResponse, ListReply, LoginReply, ReadReply, SessionInfo};

/// Endpoint paths, appended to the configured API base.
pub mod endpoints {
    pub const SIGNUP: &str = "/user/signup";
    pub const LOGIN: &str = "/user/login";
    pub const SESSION: &str = "/user/session";
    pub const LOGOUT: &str = "/user/logout";
    pub const FILE_LIST: &str = "/file/list";
    pub const FILE_READ: &str = "/file/read";
    pub const FILE_CREATE: &str = "/file/create";
    pub const FILE_EDIT: &str = "/file/edit";
    pub const FILE_DELETE: &str = "/file/delete";
    pub const DIRECTORY_CREATE: &str = "/directory/create";
}
