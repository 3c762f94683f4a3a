//! Bounded most-recent-first lists.

use std::collections::{HashMap, VecDeque};

use drivehub_entity::file::FileRecord;

use crate::tree::DriveTreeStore;

/// Capacity used when a list is collected from an iterator.
pub const DEFAULT_CAPACITY: usize = 10;

/// Most-recent-first list with a fixed capacity.
///
/// Touching an entry that is already present moves it to the front;
/// touching a new entry at capacity evicts the oldest one.
#[derive(Debug, Clone)]
pub struct RecencyList<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T: PartialEq> RecencyList<T> {
    /// Create an empty list holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild a list from entries ordered most recent first, e.g. ones
    /// loaded from saved state. Entries past `capacity` are dropped.
    pub fn with_entries(capacity: usize, entries: impl IntoIterator<Item = T>) -> Self {
        let mut list = Self::new(capacity);
        let items: Vec<T> = entries.into_iter().collect();
        for item in items.into_iter().rev() {
            list.touch(item);
        }
        list
    }

    /// Record a use of `item`.
    pub fn touch(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if let Some(pos) = self.entries.iter().position(|e| *e == item) {
            self.entries.remove(pos);
        }
        self.entries.push_front(item);
        self.entries.truncate(self.capacity);
    }

    /// Drop `item` if present.
    pub fn forget(&mut self, item: &T) -> bool {
        match self.entries.iter().position(|e| e == item) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: PartialEq> FromIterator<T> for RecencyList<T> {
    /// Build from entries ordered most recent first.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::with_entries(DEFAULT_CAPACITY, iter)
    }
}

/// Resolve recently used provider file ids against the forest.
///
/// `ids` is most recent first. Unknown ids are skipped, duplicates keep
/// their first position, and at most `capacity` files are returned.
pub fn recent_files<'a>(
    store: &'a DriveTreeStore,
    ids: &[String],
    capacity: usize,
) -> Vec<&'a FileRecord> {
    let by_id: HashMap<&str, &FileRecord> = store
        .files()
        .into_iter()
        .flat_map(|file| [(file.source_id.as_str(), file), (file.id.as_str(), file)])
        .collect();

    let mut list = RecencyList::new(capacity);
    for file in ids.iter().rev().filter_map(|id| by_id.get(id.as_str())) {
        list.touch(file.id.clone());
    }
    list.iter()
        .filter_map(|id| by_id.get(id.as_str()).copied())
        .collect()
}
