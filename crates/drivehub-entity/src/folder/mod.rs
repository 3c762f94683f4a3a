//! Folder domain entities.

pub mod check;
pub mod node;

pub use check::CheckState;
pub use node::{FolderNode, NodeKind};
