//! Drive explorer session: the tree store plus best-effort persistence.
//!
//! Every mutation is applied to the in-memory store first and persisted
//! afterwards. A failed write is logged and otherwise ignored; it never
//! rolls the mutation back.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use drivehub_core::config::tree::InitialSelection;
use drivehub_core::result::AppResult;
use drivehub_core::traits::state::StateStore;
use drivehub_core::types::FolderId;
use drivehub_entity::folder::{CheckState, FolderNode};

use crate::tree::DriveTreeStore;

/// State key of the persisted selection.
pub const SELECTION_KEY: &str = "drive:selected";
/// State key of the persisted expansion map.
pub const EXPANSION_KEY: &str = "drive:expanded";

/// A drive tree bound to a state store.
#[derive(Debug)]
pub struct DriveExplorer {
    /// The forest and selection.
    store: DriveTreeStore,
    /// Durable storage for selection and expansion.
    state: Arc<dyn StateStore>,
    /// Selection applied on first load when nothing was persisted.
    initial_selection: InitialSelection,
    /// Whether a selection has ever been persisted or restored.
    has_persisted_selection: bool,
    /// Expansion remembered across forest replacements.
    remembered_expansion: BTreeMap<FolderId, bool>,
    /// Folder whose expansion was toggled last.
    active_folder: Option<FolderId>,
}

impl DriveExplorer {
    /// Create an explorer with an empty forest.
    pub fn new(state: Arc<dyn StateStore>, initial_selection: InitialSelection) -> Self {
        Self {
            store: DriveTreeStore::new(),
            state,
            initial_selection,
            has_persisted_selection: false,
            remembered_expansion: BTreeMap::new(),
            active_folder: None,
        }
    }

    /// The underlying tree store.
    pub fn store(&self) -> &DriveTreeStore {
        &self.store
    }

    /// Shortcut for [`DriveTreeStore::check_state`].
    pub fn check_state(&self, id: impl AsRef<str>) -> CheckState {
        self.store.check_state(id)
    }

    /// Folder whose expansion was toggled last.
    pub fn active_folder(&self) -> Option<&FolderId> {
        self.active_folder.as_ref()
    }

    /// Load persisted selection and expansion. Unreadable or corrupt state
    /// is logged and treated as absent.
    pub async fn restore(&mut self) {
        if let Some(selected) = self.load_json::<Vec<FolderId>>(SELECTION_KEY).await {
            debug!(count = selected.len(), "Restored folder selection");
            self.store.set_selection(selected);
            self.has_persisted_selection = true;
        }
        if let Some(expansion) = self
            .load_json::<BTreeMap<FolderId, bool>>(EXPANSION_KEY)
            .await
        {
            self.store.restore_expansion(&expansion);
            self.remembered_expansion = expansion;
        }
    }

    /// Replace the forest with a freshly loaded one.
    ///
    /// Remembered expansion is re-applied to ids that survived. When the
    /// forest is non-empty and no selection was ever persisted, the
    /// configured initial selection is applied.
    pub async fn apply_forest(&mut self, forest: Vec<FolderNode>) {
        self.store.replace_tree(forest);
        self.store.restore_expansion(&self.remembered_expansion);

        if !self.has_persisted_selection && !self.store.forest().is_empty() {
            match self.initial_selection {
                InitialSelection::All => {
                    info!("No saved selection; selecting every folder");
                    self.store.select_all();
                    self.persist_selection().await;
                }
                InitialSelection::Empty => {}
            }
        }
    }

    /// Flip a folder's expand state and remember it.
    pub async fn toggle_expand(&mut self, id: impl AsRef<str>) {
        let id = id.as_ref();
        self.active_folder = Some(FolderId::from(id));
        if self.store.toggle_expand(id) {
            self.persist_expansion().await;
        }
    }

    /// Cascade-toggle a folder's subtree.
    pub async fn toggle_cascade(&mut self, id: impl AsRef<str>) {
        self.store.toggle_cascade(id);
        self.persist_selection().await;
    }

    /// Toggle a single folder without its subtree.
    pub async fn toggle_select(&mut self, id: impl AsRef<str>) {
        self.store.toggle_select(id);
        self.persist_selection().await;
    }

    /// Select every folder.
    pub async fn select_all(&mut self) {
        self.store.select_all();
        self.persist_selection().await;
    }

    /// Deselect everything.
    pub async fn clear_selection(&mut self) {
        self.store.clear_selection();
        self.persist_selection().await;
    }

    /// Drop selected ids that the current forest no longer contains.
    pub async fn prune_selection(&mut self) -> usize {
        let dropped = self.store.prune_selection();
        if dropped > 0 {
            info!(dropped, "Pruned stale folder selection");
            self.persist_selection().await;
        }
        dropped
    }

    /// Mutable access for enrichment passes that do not touch selection
    /// or expansion (favorites overlay).
    pub fn store_mut(&mut self) -> &mut DriveTreeStore {
        &mut self.store
    }

    async fn persist_selection(&mut self) {
        self.has_persisted_selection = true;
        let ids: Vec<&FolderId> = self.store.selection().iter().collect();
        if let Err(e) = self.save_json(SELECTION_KEY, &ids).await {
            warn!(error = %e, "Failed to persist folder selection");
        }
    }

    async fn persist_expansion(&mut self) {
        // Merge so nodes absent from this forest keep their recorded state.
        self.remembered_expansion
            .extend(self.store.expansion_state());
        if let Err(e) = self
            .save_json(EXPANSION_KEY, &self.remembered_expansion)
            .await
        {
            warn!(error = %e, "Failed to persist folder expansion");
        }
    }

    async fn save_json<T: serde::Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.state.save(key, &json).await
    }

    async fn load_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.state.load(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, error = %e, "Failed to read saved state");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Ignoring corrupt saved state");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::state::MemoryStateStore;
    use drivehub_core::error::AppError;

    fn forest() -> Vec<FolderNode> {
        vec![FolderNode::drive("root", "Root").with_sub_folders(vec![
            FolderNode::folder("A", "A").with_sub_folders(vec![
                FolderNode::folder("B", "B"),
                FolderNode::folder("C", "C"),
            ]),
        ])]
    }

    #[derive(Debug)]
    struct BrokenStore;

    #[async_trait]
    impl StateStore for BrokenStore {
        async fn load(&self, _key: &str) -> AppResult<Option<String>> {
            Err(AppError::storage("disk gone"))
        }
        async fn save(&self, _key: &str, _value: &str) -> AppResult<()> {
            Err(AppError::storage("disk gone"))
        }
        async fn remove(&self, _key: &str) -> AppResult<()> {
            Err(AppError::storage("disk gone"))
        }
    }

    #[tokio::test]
    async fn test_selection_persists_across_sessions() {
        let state = Arc::new(MemoryStateStore::new());

        let mut first = DriveExplorer::new(state.clone(), InitialSelection::Empty);
        first.apply_forest(forest()).await;
        first.toggle_cascade("A").await;

        let mut second = DriveExplorer::new(state, InitialSelection::All);
        second.restore().await;
        second.apply_forest(forest()).await;
        assert_eq!(second.check_state("A"), CheckState::Checked);
        assert!(!second.store().is_selected("root"));
    }

    #[tokio::test]
    async fn test_initial_select_all_only_without_saved_selection() {
        let state = Arc::new(MemoryStateStore::new());

        let mut explorer = DriveExplorer::new(state.clone(), InitialSelection::All);
        explorer.restore().await;
        explorer.apply_forest(Vec::new()).await;
        assert!(explorer.store().selection().is_empty());

        explorer.apply_forest(forest()).await;
        assert_eq!(explorer.check_state("root"), CheckState::Checked);

        explorer.clear_selection().await;
        let mut reopened = DriveExplorer::new(state, InitialSelection::All);
        reopened.restore().await;
        reopened.apply_forest(forest()).await;
        assert!(reopened.store().selection().is_empty());
    }

    #[tokio::test]
    async fn test_expansion_survives_refresh() {
        let state = Arc::new(MemoryStateStore::new());
        let mut explorer = DriveExplorer::new(state, InitialSelection::Empty);
        explorer.apply_forest(forest()).await;
        explorer.toggle_expand("A").await;
        assert_eq!(explorer.active_folder().map(FolderId::as_str), Some("A"));

        explorer.apply_forest(forest()).await;
        assert!(explorer.store().find("A").is_some_and(|n| n.is_expanded));
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_mutation() {
        let mut explorer = DriveExplorer::new(Arc::new(BrokenStore), InitialSelection::Empty);
        explorer.restore().await;
        explorer.apply_forest(forest()).await;
        explorer.toggle_cascade("A").await;
        assert_eq!(explorer.check_state("A"), CheckState::Checked);
        explorer.toggle_expand("B").await;
        assert!(explorer.store().find("B").is_some_and(|n| n.is_expanded));
    }

    #[tokio::test]
    async fn test_prune_selection_persists() {
        let state = Arc::new(MemoryStateStore::new());
        state
            .save(SELECTION_KEY, r#"["A", "vanished"]"#)
            .await
            .unwrap();

        let mut explorer = DriveExplorer::new(state.clone(), InitialSelection::Empty);
        explorer.restore().await;
        explorer.apply_forest(forest()).await;
        assert_eq!(explorer.store().selection().len(), 2);

        assert_eq!(explorer.prune_selection().await, 1);
        let saved = state.load(SELECTION_KEY).await.unwrap().unwrap();
        assert_eq!(saved, r#"["A"]"#);
    }

    #[tokio::test]
    async fn test_corrupt_state_is_ignored() {
        let state = Arc::new(MemoryStateStore::new());
        state.save(SELECTION_KEY, "{not json").await.unwrap();
        let mut explorer = DriveExplorer::new(state, InitialSelection::All);
        explorer.restore().await;
        explorer.apply_forest(forest()).await;
        assert_eq!(explorer.check_state("root"), CheckState::Checked);
    }
}
