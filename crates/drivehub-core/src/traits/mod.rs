//! Collaborator traits defined in `drivehub-core` and implemented by other
//! crates.
//!
//! The drive tree never calls these itself: loaders and sessions in
//! `drivehub-service` do, and `drivehub-client` implements them over HTTP.

pub mod directory;
pub mod reindex;
pub mod source;
pub mod state;

pub use directory::UserDirectory;
pub use reindex::{ReindexReport, ReindexSink};
pub use source::{DriveSource, FavoritesStore, RecentFileStore};
pub use state::StateStore;
