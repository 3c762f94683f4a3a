//! # drivehub-service
//!
//! Services built around the drive forest. [`DriveTreeStore`] owns the
//! forest, expansion state, and cascading folder selection; everything
//! else feeds it (transform, loader) or persists and enriches what it
//! holds (explorer, favorites, recent, search, users).
//!
//! Collaborators are injected as `Arc<dyn Trait>` at construction time.

pub mod explorer;
pub mod favorites;
pub mod loader;
pub mod recent;
pub mod search;
pub mod state;
pub mod transform;
pub mod tree;
pub mod users;

pub use explorer::DriveExplorer;
pub use favorites::{favorite_files, overlay_favorites};
pub use loader::{DriveLoader, LoadOutcome, RefreshGate, RefreshTicket};
pub use recent::{RecencyList, recent_files};
pub use search::{FileQuery, search_files};
pub use state::{FileStateStore, MemoryStateStore};
pub use transform::{TransformOptions, decode_payload, native_folder_id, transform};
pub use tree::DriveTreeStore;
pub use users::UserNameResolver;
