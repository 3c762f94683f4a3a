//! User directory lookup.

use async_trait::async_trait;

use crate::result::AppResult;

/// Resolves provider user ids (file creators and updaters) to display names.
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Look up the display name of `user_id`.
    async fn display_name(&self, user_id: &str) -> AppResult<String>;
}
