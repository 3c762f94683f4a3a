//! The drive tree store.

pub mod store;

pub use store::DriveTreeStore;
