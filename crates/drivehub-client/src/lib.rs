//! # drivehub-client
//!
//! HTTP implementations of the collaborator traits defined in
//! `drivehub-core`: the REST backend that serves drive hierarchies and
//! per-user lists, and the RAG service that rebuilds search indices.

pub mod api;
pub mod drive;
pub mod lists;
pub mod reindex;
pub mod users;

pub use api::ApiClient;
pub use drive::HttpDriveSource;
pub use lists::{HttpFavoritesStore, HttpRecentFileStore};
pub use reindex::HttpReindexSink;
pub use users::HttpUserDirectory;
