//! Folder tree structures for hierarchical display.
//!
//! Nodes own their children and carry no parent pointer. Every lookup
//! walks downward from the roots; callers that need ancestor context pass
//! it explicitly.

use serde::{Deserialize, Serialize};

use drivehub_core::types::{DriveId, FolderId};

use crate::file::{DRIVE_ICON, FOLDER_ICON, FileRecord, PROVIDER_ICON};

/// What a node in the forest stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Synthetic node for a connected account.
    Provider,
    /// Synthetic node for a drive.
    Drive,
    /// A real provider folder.
    Folder,
}

impl NodeKind {
    /// Whether the node was synthesized rather than listed by a provider.
    pub fn is_synthetic(self) -> bool {
        !matches!(self, Self::Folder)
    }
}

/// A node in the drive forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    /// Identifier unique across the entire forest.
    pub id: FolderId,
    /// Display label.
    pub name: String,
    /// Provider, drive, or folder.
    pub kind: NodeKind,
    /// Owning drive, inherited from the nearest drive.
    pub drive_id: Option<DriveId>,
    /// Expand state shown by renderers.
    pub is_expanded: bool,
    /// Display glyph.
    pub icon: String,
    /// Files directly inside this folder.
    pub files: Vec<FileRecord>,
    /// Child folders in provider order.
    pub sub_folders: Vec<FolderNode>,
}

impl FolderNode {
    fn with_kind(kind: NodeKind, id: impl Into<FolderId>, name: impl Into<String>) -> Self {
        let icon = match kind {
            NodeKind::Provider => PROVIDER_ICON,
            NodeKind::Drive => DRIVE_ICON,
            NodeKind::Folder => FOLDER_ICON,
        };
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            drive_id: None,
            is_expanded: kind.is_synthetic(),
            icon: icon.to_string(),
            files: Vec::new(),
            sub_folders: Vec::new(),
        }
    }

    /// A collapsed provider folder.
    pub fn folder(id: impl Into<FolderId>, name: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Folder, id, name)
    }

    /// An expanded drive node.
    pub fn drive(id: impl Into<FolderId>, name: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Drive, id, name)
    }

    /// An expanded connected-account node.
    pub fn provider(id: impl Into<FolderId>, name: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Provider, id, name)
    }

    /// Set the owning drive.
    pub fn with_drive_id(mut self, drive_id: Option<DriveId>) -> Self {
        self.drive_id = drive_id;
        self
    }

    /// Replace the child folders.
    pub fn with_sub_folders(mut self, sub_folders: Vec<FolderNode>) -> Self {
        self.sub_folders = sub_folders;
        self
    }

    /// Replace the direct files.
    pub fn with_files(mut self, files: Vec<FileRecord>) -> Self {
        self.files = files;
        self
    }

    /// Ids of this node and every descendant folder, in pre-order.
    pub fn subtree_ids(&self) -> Vec<FolderId> {
        let mut out = Vec::new();
        self.collect_ids(&mut out);
        out
    }

    /// Append this node's subtree ids to `out`, in pre-order.
    pub fn collect_ids(&self, out: &mut Vec<FolderId>) {
        out.push(self.id.clone());
        for child in &self.sub_folders {
            child.collect_ids(out);
        }
    }

    /// Find the node with `id` in this subtree (depth-first).
    pub fn find(&self, id: &str) -> Option<&FolderNode> {
        if self.id.as_str() == id {
            return Some(self);
        }
        self.sub_folders.iter().find_map(|child| child.find(id))
    }

    /// Mutable variant of [`FolderNode::find`].
    pub fn find_mut(&mut self, id: &str) -> Option<&mut FolderNode> {
        if self.id.as_str() == id {
            return Some(self);
        }
        self.sub_folders
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Number of files in this folder and all descendants.
    pub fn total_files(&self) -> usize {
        self.files.len()
            + self
                .sub_folders
                .iter()
                .map(FolderNode::total_files)
                .sum::<usize>()
    }
}
