//! Durable key/value storage for UI state.

use async_trait::async_trait;

use crate::result::AppResult;

/// Stores string values (JSON documents) by key.
///
/// Used for best-effort persistence of selection and expansion state: a
/// failing store is logged by the caller and never rolls back the
/// in-memory mutation that triggered the write.
#[async_trait]
pub trait StateStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read a value. Returns `None` if the key was never written.
    async fn load(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn save(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}
