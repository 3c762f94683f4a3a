//! Provider payload to drive forest transformation.
//!
//! Ids are namespaced so they stay unique across every connected account
//! and drive: the same provider folder id in two drives yields two
//! distinct folder ids. Namespacing is by account and drive only (not by
//! path), so a folder keeps its id when it moves within its drive.
//!
//! The transform never fails. Records without an id are dropped together
//! with their subtree, duplicate ids are dropped (first one wins), and
//! every other missing field takes a default.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use drivehub_core::config::tree::{TreeConfig, TreeLayout};
use drivehub_core::types::{DriveId, FileId, UserId};
use drivehub_entity::file::FileRecord;
use drivehub_entity::folder::FolderNode;
use drivehub_entity::source::{DriveEnvelope, SourceDrive, SourceFile, SourceFolder, lenient};

/// Options controlling how envelopes become root trees.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Root arrangement.
    pub layout: TreeLayout,
    /// Drop system folders at the top of each drive.
    pub filter_system_folders: bool,
    /// Names treated as system folders.
    pub system_folder_names: Vec<String>,
}

impl From<&TreeConfig> for TransformOptions {
    fn from(config: &TreeConfig) -> Self {
        Self {
            layout: config.layout,
            filter_system_folders: config.filter_system_folders,
            system_folder_names: config.system_folder_names.clone(),
        }
    }
}

impl TransformOptions {
    fn is_system_folder(&self, folder: &SourceFolder) -> bool {
        self.filter_system_folders
            && folder.name.as_deref().is_some_and(|name| {
                self.system_folder_names
                    .iter()
                    .any(|system| system.eq_ignore_ascii_case(name))
            })
    }
}

/// Decode the raw hierarchy payload. Anything but an array decodes to no
/// envelopes; envelopes that fail to decode are dropped.
pub fn decode_payload(payload: Value) -> Vec<DriveEnvelope> {
    match payload {
        Value::Array(items) => {
            let total = items.len();
            let envelopes: Vec<DriveEnvelope> = lenient::decode_each(items);
            if envelopes.len() < total {
                warn!(
                    dropped = total - envelopes.len(),
                    "Dropped undecodable drive envelopes"
                );
            }
            envelopes
        }
        Value::Null => Vec::new(),
        _ => {
            warn!("Drive payload is not an array; treating as empty");
            Vec::new()
        }
    }
}

/// Build the drive forest from decoded envelopes.
pub fn transform(envelopes: &[DriveEnvelope], options: &TransformOptions) -> Vec<FolderNode> {
    let mut builder = Builder {
        options,
        seen: HashSet::new(),
        dropped: 0,
    };

    let mut namespaces = HashSet::new();
    let mut forest = Vec::new();
    for (index, envelope) in envelopes.iter().enumerate() {
        let provider_id = format!("root-{}", unique_key(&mut namespaces, envelope, index));
        let title = envelope
            .api_title
            .clone()
            .unwrap_or_else(|| "API".to_string());

        match options.layout {
            TreeLayout::Grouped => {
                let drives = envelope
                    .drives
                    .iter()
                    .filter_map(|drive| builder.drive(&provider_id, drive))
                    .collect();
                if let Some(node) = builder.claim(FolderNode::provider(provider_id, title)) {
                    forest.push(node.with_sub_folders(drives));
                }
            }
            TreeLayout::Drives => {
                forest.extend(
                    envelope
                        .drives
                        .iter()
                        .filter_map(|drive| builder.drive(&provider_id, drive)),
                );
            }
            TreeLayout::Merged => {
                let mut folders = Vec::new();
                let mut files = Vec::new();
                for drive in &envelope.drives {
                    let Some(native) = drive.id.as_deref() else {
                        builder.dropped += 1;
                        continue;
                    };
                    let scope = format!("{provider_id}/drive-{native}");
                    let drive_id = Some(DriveId::from(native));
                    folders.extend(builder.top_folders(&scope, drive, &drive_id));
                    files.extend(builder.files(&scope, drive.root_files(), &drive_id));
                }
                let drive_id = envelope
                    .drives
                    .first()
                    .and_then(|d| d.id.as_deref())
                    .map(DriveId::from);
                if let Some(node) = builder.claim(FolderNode::provider(provider_id, title)) {
                    forest.push(
                        node.with_drive_id(drive_id)
                            .with_sub_folders(folders)
                            .with_files(files),
                    );
                }
            }
        }
    }

    if builder.dropped > 0 {
        warn!(
            dropped = builder.dropped,
            "Dropped drive records without usable ids"
        );
    }
    debug!(roots = forest.len(), "Transformed drive payload");
    forest
}

/// Provider folder id of a namespaced folder id, for requests that go
/// back to the provider (reindexing). `None` for account and drive nodes.
pub fn native_folder_id(id: &str) -> Option<&str> {
    let (scope, native) = id.split_once("/folder-")?;
    scope.contains("/drive-").then_some(native)
}

/// Account namespace: explicit id, else backend index, else a slug of the
/// title, else the envelope position.
fn connection_key(envelope: &DriveEnvelope, index: usize) -> String {
    if let Some(key) = envelope.api_id.as_deref().or(envelope.api_idx.as_deref()) {
        return key.to_string();
    }
    envelope
        .api_title
        .as_deref()
        .map(slugify)
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| index.to_string())
}

/// [`connection_key`], suffixed with the envelope position while it
/// collides with a key already taken in this payload.
fn unique_key(taken: &mut HashSet<String>, envelope: &DriveEnvelope, index: usize) -> String {
    let mut key = connection_key(envelope, index);
    while !taken.insert(key.clone()) {
        debug!(key = %key, index, "Account key already taken; suffixing");
        key = format!("{key}-{index}");
    }
    key
}

/// Lowercase ASCII alphanumerics joined by single dashes.
fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

struct Builder<'a> {
    options: &'a TransformOptions,
    seen: HashSet<String>,
    dropped: usize,
}

impl Builder<'_> {
    /// Reserve a node's id; `None` if it was already used.
    fn claim(&mut self, node: FolderNode) -> Option<FolderNode> {
        if self.seen.insert(node.id.to_string()) {
            Some(node)
        } else {
            warn!(folder_id = %node.id, "Dropped duplicate folder id");
            None
        }
    }

    fn drive(&mut self, provider_id: &str, drive: &SourceDrive) -> Option<FolderNode> {
        let Some(native) = drive.id.as_deref() else {
            self.dropped += 1;
            return None;
        };
        let scope = format!("{provider_id}/drive-{native}");
        let drive_id = Some(DriveId::from(native));
        let name = drive.name.clone().unwrap_or_default();

        let node = self.claim(FolderNode::drive(scope.as_str(), name))?;
        let folders = self.top_folders(&scope, drive, &drive_id);
        let files = self.files(&scope, drive.root_files(), &drive_id);
        Some(
            node.with_drive_id(drive_id)
                .with_sub_folders(folders)
                .with_files(files),
        )
    }

    fn top_folders(
        &mut self,
        scope: &str,
        drive: &SourceDrive,
        drive_id: &Option<DriveId>,
    ) -> Vec<FolderNode> {
        let options = self.options;
        drive
            .top_folders()
            .filter(|folder| !options.is_system_folder(folder))
            .filter_map(|folder| self.folder(scope, folder, drive_id))
            .collect()
    }

    fn folder(
        &mut self,
        scope: &str,
        folder: &SourceFolder,
        drive_id: &Option<DriveId>,
    ) -> Option<FolderNode> {
        let Some(native) = folder.id.as_deref() else {
            self.dropped += 1;
            return None;
        };
        let id = format!("{scope}/folder-{native}");
        let name = folder.name.clone().unwrap_or_default();

        let node = self.claim(FolderNode::folder(id, name))?;
        let sub_folders = folder
            .children()
            .filter_map(|sub| self.folder(scope, sub, drive_id))
            .collect();
        let files = self.files(scope, &folder.files, drive_id);
        Some(
            node.with_drive_id(drive_id.clone())
                .with_sub_folders(sub_folders)
                .with_files(files),
        )
    }

    fn files(
        &mut self,
        scope: &str,
        files: &[SourceFile],
        drive_id: &Option<DriveId>,
    ) -> Vec<FileRecord> {
        let mut out = Vec::with_capacity(files.len());
        for file in files {
            let Some(native) = file.id.as_deref() else {
                self.dropped += 1;
                continue;
            };
            let id = format!("{scope}/file-{native}");
            if !self.seen.insert(id.clone()) {
                warn!(file_id = %id, "Dropped duplicate file id");
                continue;
            }

            let mut record = FileRecord::new(
                FileId::from(id),
                native,
                file.name.clone().unwrap_or_default(),
            );
            record.size = file.size.unwrap_or(0);
            record.creator = file.creator.as_deref().map(UserId::from);
            record.last_updater = file.last_updater.as_deref().map(UserId::from);
            record.created_at = file.created_at;
            record.updated_at = file.updated_at;
            record.drive_id = file
                .drive_id
                .as_deref()
                .map(DriveId::from)
                .or_else(|| drive_id.clone());
            out.push(record);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use drivehub_entity::folder::NodeKind;

    fn payload() -> Value {
        json!([{
            "apiTitle": "Dooray Main",
            "apiIdx": 7,
            "drives": [{
                "id": "d1",
                "name": "Personal",
                "root": {
                    "id": "r1",
                    "folders": [
                        { "id": "f1", "name": "Docs", "subFolders": [{ "id": "f2", "name": "Drafts" }],
                          "files": [{ "id": "100", "name": "Plan.DOCX", "size": 10,
                                      "lastUpdater": { "organizationMemberId": "m1" },
                                      "updatedAt": "2024-03-01T00:00:00Z" }] },
                        { "id": "t", "name": "Trash" }
                    ],
                    "files": [{ "id": "101", "name": "root.txt" }]
                }
            }]
        }])
    }

    #[test]
    fn test_grouped_layout_ids_and_defaults() {
        let forest = transform(&decode_payload(payload()), &TransformOptions::default());
        assert_eq!(forest.len(), 1);

        let provider = &forest[0];
        assert_eq!(provider.id.as_str(), "root-7");
        assert_eq!(provider.kind, NodeKind::Provider);
        assert!(provider.is_expanded);

        let drive = &provider.sub_folders[0];
        assert_eq!(drive.id.as_str(), "root-7/drive-d1");
        assert!(drive.is_expanded);
        assert_eq!(drive.files[0].id.as_str(), "root-7/drive-d1/file-101");

        let docs = &drive.sub_folders[0];
        assert_eq!(docs.id.as_str(), "root-7/drive-d1/folder-f1");
        assert!(!docs.is_expanded);
        assert_eq!(docs.drive_id.as_ref().map(DriveId::as_str), Some("d1"));
        assert_eq!(docs.sub_folders[0].id.as_str(), "root-7/drive-d1/folder-f2");

        let plan = &docs.files[0];
        assert_eq!(plan.source_id, "100");
        assert_eq!(plan.file_type, "docx");
        assert_eq!(plan.icon, "📝");
        assert_eq!(plan.size, 10);
        assert_eq!(plan.last_updater.as_ref().map(UserId::as_str), Some("m1"));
        assert_eq!(plan.drive_id.as_ref().map(DriveId::as_str), Some("d1"));
    }

    #[test]
    fn test_source_order_is_preserved() {
        let forest = transform(&decode_payload(payload()), &TransformOptions::default());
        let names: Vec<&str> = forest[0].sub_folders[0]
            .sub_folders
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Docs", "Trash"]);
    }

    #[test]
    fn test_system_folder_filter() {
        let options = TransformOptions {
            filter_system_folders: true,
            system_folder_names: vec!["trash".to_string()],
            ..Default::default()
        };
        let forest = transform(&decode_payload(payload()), &options);
        let names: Vec<&str> = forest[0].sub_folders[0]
            .sub_folders
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Docs"]);
    }

    #[test]
    fn test_drives_and_merged_layouts() {
        let envelopes = decode_payload(payload());

        let drives = transform(
            &envelopes,
            &TransformOptions {
                layout: TreeLayout::Drives,
                ..Default::default()
            },
        );
        assert_eq!(drives[0].kind, NodeKind::Drive);
        assert_eq!(drives[0].id.as_str(), "root-7/drive-d1");

        let merged = transform(
            &envelopes,
            &TransformOptions {
                layout: TreeLayout::Merged,
                ..Default::default()
            },
        );
        assert_eq!(merged[0].kind, NodeKind::Provider);
        assert_eq!(merged[0].sub_folders[0].name, "Docs");
        assert_eq!(merged[0].files.len(), 1);
        assert_eq!(merged[0].drive_id.as_ref().map(DriveId::as_str), Some("d1"));
    }

    #[test]
    fn test_same_native_id_in_two_drives() {
        let envelopes = decode_payload(json!([{
            "apiId": "acct",
            "drives": [
                { "id": "D1", "folders": [{ "id": "X", "name": "X" }] },
                { "id": "D2", "folders": [{ "id": "X", "name": "X" }] }
            ]
        }]));
        let forest = transform(&envelopes, &TransformOptions::default());
        let a = &forest[0].sub_folders[0].sub_folders[0].id;
        let b = &forest[0].sub_folders[1].sub_folders[0].id;
        assert_ne!(a, b);
    }

    #[test]
    fn test_records_without_ids_and_duplicates_are_dropped() {
        let envelopes = decode_payload(json!([{
            "apiTitle": "Acct",
            "drives": [
                { "name": "no id", "folders": [{ "id": "lost" }] },
                { "id": "d", "folders": [
                    { "name": "no id", "subFolders": [{ "id": "orphan" }] },
                    { "id": "dup", "name": "first" },
                    { "id": "dup", "name": "second" }
                ] }
            ]
        }]));
        let forest = transform(&envelopes, &TransformOptions::default());
        assert_eq!(forest[0].id.as_str(), "root-acct");
        let drive = &forest[0].sub_folders;
        assert_eq!(drive.len(), 1);
        let names: Vec<&str> = drive[0].sub_folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first"]);
    }

    #[test]
    fn test_non_array_payload_is_empty() {
        assert!(decode_payload(json!({ "error": "unauthorized" })).is_empty());
        assert!(decode_payload(Value::Null).is_empty());
        assert!(transform(&[], &TransformOptions::default()).is_empty());
    }

    #[test]
    fn test_accounts_with_colliding_keys_stay_distinct() {
        let envelopes = decode_payload(json!([
            { "apiTitle": "Dooray", "drives": [{ "id": "d1", "folders": [{ "id": "a" }] }] },
            { "apiTitle": "Dooray", "drives": [{ "id": "d9", "folders": [{ "id": "b" }] }] },
            { "apiId": "dooray-1", "drives": [{ "id": "d1", "folders": [{ "id": "c" }] }] },
            { "apiIdx": 3, "drives": [{ "id": "d1" }] },
            { "drives": [{ "id": "d1" }] }
        ]));
        let forest = transform(&envelopes, &TransformOptions::default());

        let roots: Vec<&str> = forest.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            roots,
            vec!["root-dooray", "root-dooray-1", "root-dooray-1-2", "root-3", "root-4"]
        );
        assert_eq!(
            forest[1].sub_folders[0].sub_folders[0].id.as_str(),
            "root-dooray-1/drive-d9/folder-b"
        );
        assert_eq!(
            forest[2].sub_folders[0].sub_folders[0].id.as_str(),
            "root-dooray-1-2/drive-d1/folder-c"
        );
    }

    #[test]
    fn test_folder_with_both_child_keys_is_kept() {
        let envelopes = decode_payload(json!([{
            "apiId": "acct",
            "drives": [{ "id": "d1", "root": {
                "id": "r",
                "subFolders": [{ "id": "a", "folders": [], "subFolders": [{ "id": "b" }] }]
            } }]
        }]));
        let forest = transform(&envelopes, &TransformOptions::default());
        let a = &forest[0].sub_folders[0].sub_folders[0];
        assert_eq!(a.id.as_str(), "root-acct/drive-d1/folder-a");
        assert_eq!(a.sub_folders[0].id.as_str(), "root-acct/drive-d1/folder-b");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("  Dooray Main!! "), "dooray-main");
        assert_eq!(slugify("한글"), "");
    }

    #[test]
    fn test_native_folder_id() {
        assert_eq!(native_folder_id("root-7/drive-d1/folder-f2"), Some("f2"));
        assert_eq!(native_folder_id("root-7/drive-d1"), None);
        assert_eq!(native_folder_id("root-7"), None);
    }
}
