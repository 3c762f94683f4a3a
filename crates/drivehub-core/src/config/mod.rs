//! Application configuration schemas.
//!
//! All configuration structs are deserialized from an optional TOML file
//! merged with `DRIVEHUB__*` environment variables via the `config` crate.
//! Every section falls back to its defaults, so an empty configuration is
//! valid.

pub mod backend;
pub mod logging;
pub mod persistence;
pub mod tree;
pub mod users;

use serde::{Deserialize, Serialize};

use self::backend::{BackendConfig, RagConfig};
use self::logging::LoggingConfig;
use self::persistence::PersistenceConfig;
use self::tree::TreeConfig;
use self::users::{RecentConfig, UserDirectoryConfig};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// REST backend that serves drives, favorites, recent files and users.
    pub backend: BackendConfig,
    /// RAG service that consumes the folder selection for reindexing.
    pub rag: RagConfig,
    /// Drive tree transform and selection defaults.
    pub tree: TreeConfig,
    /// Durable storage for selection and expansion state.
    pub persistence: PersistenceConfig,
    /// Bounded recency views.
    pub recent: RecentConfig,
    /// User display-name resolution.
    pub users: UserDirectoryConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional. Environment variables use the `DRIVEHUB`
    /// prefix with `__` as the section separator, for example
    /// `DRIVEHUB__BACKEND__BASE_URL`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("DRIVEHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tree::{InitialSelection, TreeLayout};

    #[test]
    fn test_defaults_from_empty_document() {
        let config: AppConfig = serde_json::from_str("{}").expect("empty config");
        assert_eq!(config.backend.base_url, "http://localhost:8090");
        assert_eq!(config.rag.reindex_path, "/reindex");
        assert_eq!(config.tree.layout, TreeLayout::Grouped);
        assert_eq!(config.tree.initial_selection, InitialSelection::Empty);
        assert_eq!(config.tree.system_folder_names, vec!["root", "trash"]);
        assert_eq!(config.recent.file_capacity, 10);
        assert_eq!(config.users.placeholder, "-");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "tree": { "layout": "drives", "filter_system_folders": true }
        }))
        .expect("partial config");
        assert_eq!(config.tree.layout, TreeLayout::Drives);
        assert!(config.tree.filter_system_folders);
        assert_eq!(config.tree.initial_selection, InitialSelection::Empty);
        assert!(config.persistence.enabled);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist/drivehub").expect("load");
        assert_eq!(config.backend.timeout_seconds, 30);
    }
}
