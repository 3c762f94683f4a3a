//! # drivehub-entity
//!
//! Domain entities for DriveHub. `folder` and `file` hold the in-memory
//! drive forest consumed by the tree store; `source` holds the
//! provider-specific payload shapes the forest is built from.

pub mod file;
pub mod folder;
pub mod source;
