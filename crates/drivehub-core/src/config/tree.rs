//! Drive tree transform and selection configuration.

use serde::{Deserialize, Serialize};

/// How provider envelopes and their drives are arranged into root trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeLayout {
    /// One root per connected account, with a node per drive beneath it.
    #[default]
    Grouped,
    /// One root per drive; account nodes are omitted.
    Drives,
    /// One root per connected account holding every drive's top folders.
    Merged,
}

/// Selection applied the first time a non-empty tree is loaded and no
/// selection has ever been persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialSelection {
    /// Start with nothing selected.
    #[default]
    Empty,
    /// Start with every folder selected.
    All,
}

/// Drive tree configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Root arrangement.
    pub layout: TreeLayout,
    /// Drop well-known system folders at the top of each drive.
    pub filter_system_folders: bool,
    /// Names treated as system folders (compared ASCII case-insensitively).
    pub system_folder_names: Vec<String>,
    /// First-load selection policy.
    pub initial_selection: InitialSelection,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            layout: TreeLayout::default(),
            filter_system_folders: false,
            system_folder_names: vec!["root".to_string(), "trash".to_string()],
            initial_selection: InitialSelection::default(),
        }
    }
}
