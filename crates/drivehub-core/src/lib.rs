//! # drivehub-core
//!
//! Core crate for DriveHub. Contains configuration schemas, string-backed
//! typed identifiers, the collaborator traits implemented by the client
//! crate, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DriveHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
