//! Favorite file marking.
//!
//! The favorites endpoint reports provider-native file ids, while the
//! forest holds namespaced ids. A file counts as a favorite when either
//! form is listed.

use std::collections::HashSet;

use drivehub_entity::file::FileRecord;
use drivehub_entity::folder::FolderNode;

use crate::tree::DriveTreeStore;

fn is_listed(file: &FileRecord, ids: &HashSet<String>) -> bool {
    ids.contains(file.id.as_str()) || ids.contains(&file.source_id)
}

/// Set `is_favorite` on every file of the store. Returns the number of
/// favorites.
pub fn overlay_favorites(store: &mut DriveTreeStore, ids: &HashSet<String>) -> usize {
    let mut marked = 0;
    store.for_each_file_mut(|file| {
        file.is_favorite = is_listed(file, ids);
        if file.is_favorite {
            marked += 1;
        }
    });
    marked
}

/// Same as [`overlay_favorites`] for a forest that has not been handed to
/// a store yet.
pub(crate) fn overlay_forest(forest: &mut [FolderNode], ids: &HashSet<String>) -> usize {
    forest.iter_mut().map(|node| overlay_node(node, ids)).sum()
}

fn overlay_node(node: &mut FolderNode, ids: &HashSet<String>) -> usize {
    let mut marked = 0;
    for file in &mut node.files {
        file.is_favorite = is_listed(file, ids);
        marked += usize::from(file.is_favorite);
    }
    marked + overlay_forest(&mut node.sub_folders, ids)
}

/// Favorite files in forest order.
pub fn favorite_files(store: &DriveTreeStore) -> Vec<&FileRecord> {
    store
        .files()
        .into_iter()
        .filter(|file| file.is_favorite)
        .collect()
}
