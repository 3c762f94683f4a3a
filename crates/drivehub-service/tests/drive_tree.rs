//! End-to-end tests: provider payload to transformed forest to tree store.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{Value, json};

use drivehub_core::config::tree::{InitialSelection, TreeLayout};
use drivehub_entity::folder::CheckState;
use drivehub_service::{
    DriveExplorer, DriveTreeStore, FileQuery, MemoryStateStore, TransformOptions, decode_payload,
    favorite_files, overlay_favorites, search_files, transform,
};

fn payload() -> Value {
    json!([{
        "apiTitle": "Dooray",
        "apiIdx": 1,
        "drives": [
            {
                "id": "D1",
                "name": "Team",
                "root": {
                    "folders": [{
                        "id": "A",
                        "name": "Projects",
                        "subFolders": [
                            { "id": "B", "name": "Alpha", "files": [{ "id": "10", "name": "charter.hwp" }] },
                            { "id": "C", "name": "Beta" }
                        ]
                    }, {
                        "id": "X",
                        "name": "Shared"
                    }]
                }
            },
            {
                "id": "D2",
                "name": "Personal",
                "folders": [
                    { "id": "X", "name": "Shared", "files": [{ "id": "11", "name": "notes.txt" }] },
                    { "id": "T", "name": "trash" }
                ]
            }
        ]
    }])
}

fn load(options: &TransformOptions) -> DriveTreeStore {
    DriveTreeStore::with_forest(transform(&decode_payload(payload()), options))
}

const A: &str = "root-1/drive-D1/folder-A";
const B: &str = "root-1/drive-D1/folder-B";
const C: &str = "root-1/drive-D1/folder-C";
const D1_X: &str = "root-1/drive-D1/folder-X";
const D2_X: &str = "root-1/drive-D2/folder-X";

#[test]
fn test_same_native_id_in_two_drives_stays_distinct() {
    let mut store = load(&TransformOptions::default());

    assert!(store.find(D1_X).is_some());
    assert!(store.find(D2_X).is_some());

    store.toggle_cascade(D1_X);
    assert!(store.is_selected(D1_X));
    assert!(!store.is_selected(D2_X));
    assert_eq!(store.check_state(D2_X), CheckState::Unchecked);
}

#[test]
fn test_cascade_and_partial_selection() {
    let mut store = load(&TransformOptions::default());

    store.toggle_cascade(A);
    for id in [A, B, C] {
        assert!(store.is_selected(id));
    }
    assert_eq!(store.check_state(A), CheckState::Checked);

    store.toggle_cascade(B);
    assert_eq!(store.check_state(A), CheckState::Indeterminate);
    assert_eq!(store.check_state(B), CheckState::Unchecked);

    // Partially selected subtree becomes fully selected.
    store.toggle_cascade(A);
    assert_eq!(store.check_state(A), CheckState::Checked);

    store.toggle_cascade(A);
    assert!(store.selection().is_empty());
}

#[test]
fn test_refresh_keeps_selection_for_surviving_ids() {
    let mut store = load(&TransformOptions::default());
    store.toggle_cascade(A);
    let before = store.selection().clone();

    store.replace_tree(transform(&decode_payload(payload()), &TransformOptions::default()));
    assert_eq!(store.selection(), &before);
}

#[test]
fn test_select_all_covers_every_node_and_clear_empties() {
    let mut store = load(&TransformOptions::default());
    store.select_all();
    assert_eq!(store.selection().len(), store.folder_count());
    for root in store.forest() {
        assert_eq!(store.check_state(&root.id), CheckState::Checked);
    }
    store.clear_selection();
    assert!(store.selection().is_empty());
}

#[test]
fn test_system_folders_are_filtered_when_enabled() {
    let options = TransformOptions {
        layout: TreeLayout::Drives,
        filter_system_folders: true,
        system_folder_names: vec!["root".into(), "trash".into()],
    };
    let store = load(&options);
    assert_eq!(store.forest().len(), 2);
    assert!(store.find("root-1/drive-D2/folder-T").is_none());

    let unfiltered = load(&TransformOptions {
        layout: TreeLayout::Drives,
        ..TransformOptions::default()
    });
    assert!(unfiltered.find("root-1/drive-D2/folder-T").is_some());
}

#[test]
fn test_reindex_scope_excludes_synthetic_nodes() {
    let mut store = load(&TransformOptions::default());
    store.select_all();
    let scope = store.reindex_scope();
    assert!(scope.iter().all(|id| id.as_str().contains("/folder-")));
    assert_eq!(scope.len(), 6);
}

#[test]
fn test_favorites_and_search_over_loaded_forest() {
    let mut store = load(&TransformOptions::default());
    overlay_favorites(&mut store, &HashSet::from(["11".to_string()]));

    let favorites = favorite_files(&store);
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id.as_str(), "root-1/drive-D2/file-11");

    let hits = search_files(&store, &FileQuery::text("CHARTER"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].file_type, "hwp");
}

#[tokio::test]
async fn test_explorer_session_round_trip() {
    let state = Arc::new(MemoryStateStore::new());

    let mut session = DriveExplorer::new(state.clone(), InitialSelection::Empty);
    session.restore().await;
    session
        .apply_forest(transform(&decode_payload(payload()), &TransformOptions::default()))
        .await;
    session.toggle_cascade(A).await;
    session.toggle_expand(A).await;

    let mut reopened = DriveExplorer::new(state, InitialSelection::All);
    reopened.restore().await;
    reopened
        .apply_forest(transform(&decode_payload(payload()), &TransformOptions::default()))
        .await;

    assert_eq!(reopened.check_state(A), CheckState::Checked);
    assert!(!reopened.store().is_selected(D2_X));
    assert!(reopened.store().find(A).is_some_and(|n| n.is_expanded));
}
