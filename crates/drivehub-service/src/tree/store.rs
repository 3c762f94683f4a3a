//! Folder forest with expand state and cascading tri-state selection.
//!
//! Selection is stored as a flat set of folder ids. Check states are
//! derived on demand by aggregating a folder's subtree against that set,
//! so nothing indeterminate is ever stored and replacing the forest cannot
//! leave a stale aggregate behind.
//!
//! No operation here fails: ids that are not in the current forest (a
//! stale UI event racing a refresh, say) hit a defined fallback.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use drivehub_core::types::FolderId;
use drivehub_entity::file::FileRecord;
use drivehub_entity::folder::{CheckState, FolderNode, NodeKind};

/// In-memory drive forest plus the selected-folder set.
#[derive(Debug, Clone, Default)]
pub struct DriveTreeStore {
    /// Root trees.
    forest: Vec<FolderNode>,
    /// Selected folder ids; may reference ids no longer in the forest.
    selected: BTreeSet<FolderId>,
}

impl DriveTreeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `forest` with nothing selected.
    pub fn with_forest(forest: Vec<FolderNode>) -> Self {
        Self {
            forest,
            selected: BTreeSet::new(),
        }
    }

    /// The root trees.
    pub fn forest(&self) -> &[FolderNode] {
        &self.forest
    }

    /// Replace the whole forest. Selection is left untouched.
    pub fn replace_tree(&mut self, forest: Vec<FolderNode>) {
        debug!(roots = forest.len(), "Replacing drive forest");
        self.forest = forest;
    }

    /// Find a node anywhere in the forest.
    pub fn find(&self, id: impl AsRef<str>) -> Option<&FolderNode> {
        let id = id.as_ref();
        self.forest.iter().find_map(|root| root.find(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut FolderNode> {
        self.forest.iter_mut().find_map(|root| root.find_mut(id))
    }

    // ── Expansion ──────────────────────────────────────────────────

    /// Flip the expand state of a node. Returns `false` (and changes
    /// nothing) when the id is unknown.
    pub fn toggle_expand(&mut self, id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        match self.find_mut(id) {
            Some(node) => {
                node.is_expanded = !node.is_expanded;
                debug!(folder_id = id, expanded = node.is_expanded, "Toggled folder");
                true
            }
            None => false,
        }
    }

    /// Set the expand state of a node. Unknown ids are ignored.
    pub fn set_expanded(&mut self, id: impl AsRef<str>, expanded: bool) -> bool {
        match self.find_mut(id.as_ref()) {
            Some(node) => {
                node.is_expanded = expanded;
                true
            }
            None => false,
        }
    }

    /// Expand state of every node, keyed by id.
    pub fn expansion_state(&self) -> BTreeMap<FolderId, bool> {
        fn walk(node: &FolderNode, out: &mut BTreeMap<FolderId, bool>) {
            out.insert(node.id.clone(), node.is_expanded);
            for child in &node.sub_folders {
                walk(child, out);
            }
        }

        let mut out = BTreeMap::new();
        for root in &self.forest {
            walk(root, &mut out);
        }
        out
    }

    /// Apply a recorded expansion map to the nodes present now. Nodes not
    /// in the map keep their defaults. Returns how many nodes matched.
    pub fn restore_expansion(&mut self, state: &BTreeMap<FolderId, bool>) -> usize {
        fn walk(node: &mut FolderNode, state: &BTreeMap<FolderId, bool>) -> usize {
            let mut matched = 0;
            if let Some(expanded) = state.get(&node.id) {
                node.is_expanded = *expanded;
                matched += 1;
            }
            for child in &mut node.sub_folders {
                matched += walk(child, state);
            }
            matched
        }

        self.forest.iter_mut().map(|root| walk(root, state)).sum()
    }

    // ── Traversal ──────────────────────────────────────────────────

    /// The node itself plus all descendant folder ids, in pre-order.
    /// Empty when the id is unknown.
    pub fn subtree_ids(&self, id: impl AsRef<str>) -> Vec<FolderId> {
        self.find(id).map(FolderNode::subtree_ids).unwrap_or_default()
    }

    /// All descendant folder ids, excluding the node itself.
    pub fn descendant_ids(&self, id: impl AsRef<str>) -> Vec<FolderId> {
        let mut ids = self.subtree_ids(id);
        if !ids.is_empty() {
            ids.remove(0);
        }
        ids
    }

    /// Every folder id in the forest, in pre-order. File ids are never
    /// included.
    pub fn all_folder_ids(&self) -> Vec<FolderId> {
        let mut out = Vec::new();
        for root in &self.forest {
            root.collect_ids(&mut out);
        }
        out
    }

    /// Number of folder nodes in the forest.
    pub fn folder_count(&self) -> usize {
        self.all_folder_ids().len()
    }

    /// Number of files in the forest.
    pub fn file_count(&self) -> usize {
        self.forest.iter().map(FolderNode::total_files).sum()
    }

    /// Every file in the forest. A folder's own files come before those
    /// of its sub-folders.
    pub fn files(&self) -> Vec<&FileRecord> {
        fn walk<'a>(node: &'a FolderNode, out: &mut Vec<&'a FileRecord>) {
            out.extend(node.files.iter());
            for child in &node.sub_folders {
                walk(child, out);
            }
        }

        let mut out = Vec::new();
        for root in &self.forest {
            walk(root, &mut out);
        }
        out
    }

    /// Visit every file mutably, e.g. to overlay favorites.
    pub fn for_each_file_mut(&mut self, mut f: impl FnMut(&mut FileRecord)) {
        fn walk(node: &mut FolderNode, f: &mut impl FnMut(&mut FileRecord)) {
            node.files.iter_mut().for_each(&mut *f);
            for child in &mut node.sub_folders {
                walk(child, f);
            }
        }

        for root in &mut self.forest {
            walk(root, &mut f);
        }
    }

    // ── Selection ──────────────────────────────────────────────────

    /// Tri-state of a folder's subtree. Unknown ids are `Unchecked`.
    pub fn check_state(&self, id: impl AsRef<str>) -> CheckState {
        let ids = self.subtree_ids(id);
        let selected = ids
            .iter()
            .filter(|id| self.selected.contains(id.as_str()))
            .count();
        CheckState::from_counts(selected, ids.len())
    }

    /// Cascade toggle: if the whole subtree is selected, deselect it;
    /// otherwise (nothing or part of it selected) select all of it.
    ///
    /// Starting from an indeterminate subtree this always lands on fully
    /// selected, so a second call does not restore the partial selection.
    /// Unknown ids are a no-op.
    pub fn toggle_cascade(&mut self, id: impl AsRef<str>) {
        let id = id.as_ref();
        let ids = self.subtree_ids(id);
        if ids.is_empty() {
            return;
        }

        let all_selected = ids.iter().all(|id| self.selected.contains(id.as_str()));
        if all_selected {
            for folder_id in &ids {
                self.selected.remove(folder_id.as_str());
            }
        } else {
            self.selected.extend(ids.iter().cloned());
        }
        debug!(
            folder_id = id,
            count = ids.len(),
            selected = !all_selected,
            "Cascade toggled folder selection"
        );
    }

    /// Toggle a single folder's membership without touching its subtree.
    /// Unknown ids are a no-op.
    pub fn toggle_select(&mut self, id: impl AsRef<str>) {
        let id = id.as_ref();
        if self.find(id).is_none() {
            return;
        }
        if !self.selected.remove(id) {
            self.selected.insert(FolderId::from(id));
        }
    }

    /// Select every folder in the forest.
    pub fn select_all(&mut self) {
        self.selected = self.all_folder_ids().into_iter().collect();
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Direct membership test, not subtree-aware.
    pub fn is_selected(&self, id: impl AsRef<str>) -> bool {
        self.selected.contains(id.as_ref())
    }

    /// The raw selection set.
    pub fn selection(&self) -> &BTreeSet<FolderId> {
        &self.selected
    }

    /// Replace the selection set as-is. Ids not in the forest are kept so
    /// a selection restored before the first load survives it.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = FolderId>) {
        self.selected = ids.into_iter().collect();
    }

    /// Drop selected ids that are not in the current forest. Returns how
    /// many were dropped.
    pub fn prune_selection(&mut self) -> usize {
        let present: BTreeSet<FolderId> = self.all_folder_ids().into_iter().collect();
        let before = self.selected.len();
        self.selected.retain(|id| present.contains(id));
        before - self.selected.len()
    }

    /// Selected real folders in forest order, for scoping a reindex or a
    /// search. Account and drive nodes are synthetic and never included.
    pub fn reindex_scope(&self) -> Vec<FolderId> {
        fn walk(node: &FolderNode, selected: &BTreeSet<FolderId>, out: &mut Vec<FolderId>) {
            if node.kind == NodeKind::Folder && selected.contains(&node.id) {
                out.push(node.id.clone());
            }
            for child in &node.sub_folders {
                walk(child, selected, out);
            }
        }

        let mut out = Vec::new();
        for root in &self.forest {
            walk(root, &self.selected, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `Root{ A{ B, C } }`
    fn root_abc() -> DriveTreeStore {
        DriveTreeStore::with_forest(vec![FolderNode::drive("root", "Root").with_sub_folders(
            vec![FolderNode::folder("A", "A").with_sub_folders(vec![
                FolderNode::folder("B", "B"),
                FolderNode::folder("C", "C"),
            ])],
        )])
    }

    fn selection(store: &DriveTreeStore) -> Vec<&str> {
        store.selection().iter().map(FolderId::as_str).collect()
    }

    #[test]
    fn test_unselected_forest_is_unchecked() {
        let store = root_abc();
        for id in store.all_folder_ids() {
            assert_eq!(store.check_state(&id), CheckState::Unchecked);
        }
    }

    #[test]
    fn test_partial_then_cascade() {
        let mut store = root_abc();
        store.toggle_select("B");
        assert_eq!(store.check_state("B"), CheckState::Checked);
        assert_eq!(store.check_state("A"), CheckState::Indeterminate);
        assert_eq!(store.check_state("root"), CheckState::Indeterminate);

        store.toggle_cascade("A");
        assert_eq!(selection(&store), vec!["A", "B", "C"]);
        for id in ["A", "B", "C"] {
            assert_eq!(store.check_state(id), CheckState::Checked);
        }
        assert_eq!(store.check_state("root"), CheckState::Indeterminate);
    }

    #[test]
    fn test_cascade_from_indeterminate_converges_to_checked() {
        let mut store = root_abc();
        store.toggle_select("C");
        store.toggle_cascade("A");
        assert_eq!(store.check_state("A"), CheckState::Checked);

        // Second call deselects everything rather than restoring {C}.
        store.toggle_cascade("A");
        assert_eq!(store.check_state("A"), CheckState::Unchecked);
        assert!(!store.is_selected("C"));
    }

    #[test]
    fn test_cascade_round_trip_from_checked() {
        let mut store = root_abc();
        store.select_all();
        let before = store.selection().clone();
        store.toggle_cascade("A");
        assert_eq!(store.check_state("A"), CheckState::Unchecked);
        assert!(store.is_selected("root"));
        store.toggle_cascade("A");
        assert_eq!(store.selection(), &before);
    }

    #[test]
    fn test_cascade_round_trip_from_unchecked() {
        let mut store = root_abc();
        store.toggle_cascade("A");
        store.toggle_cascade("A");
        assert!(store.selection().is_empty());

        store.toggle_select("C");
        let before = store.selection().clone();
        store.toggle_cascade("B");
        assert_eq!(selection(&store), vec!["B", "C"]);
        store.toggle_cascade("B");
        assert_eq!(store.selection(), &before);
        assert!(store.is_selected("C"));
    }

    #[test]
    fn test_cascade_leaves_ancestors_alone() {
        let mut store = root_abc();
        store.toggle_cascade("B");
        assert!(!store.is_selected("A"));
        assert!(!store.is_selected("root"));
        assert_eq!(store.check_state("A"), CheckState::Indeterminate);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut store = root_abc();
        let before = store.forest().to_vec();
        assert!(!store.toggle_expand("missing"));
        assert_eq!(store.forest(), before.as_slice());

        store.toggle_cascade("missing");
        store.toggle_select("missing");
        assert!(store.selection().is_empty());
        assert_eq!(store.check_state("missing"), CheckState::Unchecked);
        assert!(store.subtree_ids("missing").is_empty());
        assert!(store.descendant_ids("missing").is_empty());
    }

    #[test]
    fn test_toggle_expand_does_not_touch_selection() {
        let mut store = root_abc();
        store.toggle_select("A");
        assert!(store.toggle_expand("B"));
        assert!(store.find("B").is_some_and(|n| n.is_expanded));
        assert!(store.toggle_expand("root"));
        assert!(store.find("root").is_some_and(|n| !n.is_expanded));
        assert_eq!(selection(&store), vec!["A"]);
    }

    #[test]
    fn test_select_all_excludes_files_and_clear() {
        let mut store = root_abc();
        if let Some(root) = store.forest.first_mut() {
            root.files.push(FileRecord::new("root/file-1", "1", "x.pdf"));
        }
        store.select_all();
        assert_eq!(store.selection().len(), 4);
        assert!(!store.is_selected("root/file-1"));
        store.clear_selection();
        assert!(store.selection().is_empty());
    }

    #[test]
    fn test_replace_tree_keeps_selection() {
        let mut store = root_abc();
        store.toggle_cascade("A");
        store.replace_tree(Vec::new());
        assert_eq!(store.selection().len(), 3);
        assert_eq!(store.check_state("A"), CheckState::Unchecked);
        store.toggle_cascade("A");
        assert_eq!(store.selection().len(), 3);
        assert_eq!(store.prune_selection(), 3);
        assert!(store.selection().is_empty());
    }

    #[test]
    fn test_reindex_scope_skips_synthetic_nodes() {
        let mut store = root_abc();
        store.select_all();
        let scope: Vec<String> = store.reindex_scope().into_iter().map(String::from).collect();
        assert_eq!(scope, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_expansion_state_round_trip() {
        let mut store = root_abc();
        store.toggle_expand("A");
        let state = store.expansion_state();
        assert_eq!(state.get("A"), Some(&true));

        let mut reloaded = root_abc();
        assert_eq!(reloaded.restore_expansion(&state), 4);
        assert!(reloaded.find("A").is_some_and(|n| n.is_expanded));
    }

    #[test]
    fn test_descendant_ids() {
        let store = root_abc();
        let ids: Vec<String> = store.descendant_ids("A").into_iter().map(String::from).collect();
        assert_eq!(ids, vec!["B", "C"]);
        assert_eq!(store.folder_count(), 4);
    }
}
