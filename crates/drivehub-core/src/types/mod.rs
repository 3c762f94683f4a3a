//! Core type definitions used across the DriveHub workspace.

pub mod id;

pub use id::*;
