//! Display names for creators and last updaters.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use moka::future::Cache;
use tracing::{debug, warn};

use drivehub_core::config::users::UserDirectoryConfig;
use drivehub_core::traits::directory::UserDirectory;

/// Caching front for a [`UserDirectory`].
///
/// Failed or blank lookups resolve to the placeholder and are not cached,
/// so the next call retries.
#[derive(Debug, Clone)]
pub struct UserNameResolver {
    directory: Arc<dyn UserDirectory>,
    cache: Cache<String, String>,
    placeholder: String,
}

impl UserNameResolver {
    /// Create a resolver from configuration.
    pub fn new(directory: Arc<dyn UserDirectory>, config: &UserDirectoryConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(Duration::from_secs(config.cache_ttl_seconds))
            .build();
        Self {
            directory,
            cache,
            placeholder: config.placeholder.clone(),
        }
    }

    /// Text shown for unresolvable users.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Display name of `user_id`, or the placeholder.
    pub async fn resolve(&self, user_id: &str) -> String {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return self.placeholder.clone();
        }
        if let Some(name) = self.cache.get(user_id).await {
            return name;
        }

        match self.directory.display_name(user_id).await {
            Ok(name) if !name.trim().is_empty() => {
                let name = name.trim().to_string();
                debug!(user_id, name = %name, "Resolved user name");
                self.cache.insert(user_id.to_string(), name.clone()).await;
                name
            }
            Ok(_) => self.placeholder.clone(),
            Err(e) => {
                warn!(user_id, error = %e, "User lookup failed");
                self.placeholder.clone()
            }
        }
    }

    /// Resolve several ids concurrently. Duplicates are looked up once.
    pub async fn resolve_many<I, S>(&self, user_ids: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = user_ids
            .into_iter()
            .map(|id| id.as_ref().trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        unique.sort();
        unique.dedup();

        let names = join_all(unique.iter().map(|id| self.resolve(id))).await;
        unique.into_iter().zip(names).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use drivehub_core::error::AppError;
    use drivehub_core::result::AppResult;

    #[derive(Debug, Default)]
    struct CountingDirectory {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl UserDirectory for CountingDirectory {
        async fn display_name(&self, user_id: &str) -> AppResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match user_id {
                "m-1" => Ok("Kim Minji".to_string()),
                "blank" => Ok("   ".to_string()),
                _ => Err(AppError::external("unknown member")),
            }
        }
    }

    fn resolver(directory: Arc<CountingDirectory>) -> UserNameResolver {
        UserNameResolver::new(directory, &UserDirectoryConfig::default())
    }

    #[tokio::test]
    async fn test_resolve_caches_hits() {
        let directory = Arc::new(CountingDirectory::default());
        let resolver = resolver(directory.clone());

        assert_eq!(resolver.resolve("m-1").await, "Kim Minji");
        assert_eq!(resolver.resolve("m-1").await, "Kim Minji");
        assert_eq!(directory.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_use_placeholder_and_retry() {
        let directory = Arc::new(CountingDirectory::default());
        let resolver = resolver(directory.clone());

        assert_eq!(resolver.resolve("ghost").await, "-");
        assert_eq!(resolver.resolve("ghost").await, "-");
        assert_eq!(resolver.resolve("blank").await, "-");
        assert_eq!(resolver.resolve("").await, "-");
        assert_eq!(directory.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_resolve_many_dedupes() {
        let directory = Arc::new(CountingDirectory::default());
        let resolver = resolver(directory.clone());

        let names = resolver.resolve_many(["m-1", "ghost", "m-1", " "]).await;
        assert_eq!(names.len(), 2);
        assert_eq!(names["m-1"], "Kim Minji");
        assert_eq!(names["ghost"], "-");
        assert_eq!(directory.calls.load(Ordering::SeqCst), 2);
    }
}
