//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivehub_core::types::{DriveId, FileId, UserId};

use super::kind::{FileCategory, file_type_of, icon_for_type};

/// A leaf file inside a drive folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Globally unique (namespaced) file identifier.
    pub id: FileId,
    /// The provider's own identifier, used to match favorites and recents.
    pub source_id: String,
    /// File name including extension.
    pub name: String,
    /// Lowercase extension derived from `name`.
    #[serde(rename = "type")]
    pub file_type: String,
    /// Size in bytes.
    pub size: u64,
    /// Glyph derived from `file_type`.
    pub icon: String,
    /// Provider id of the creator.
    pub creator: Option<UserId>,
    /// Provider id of the last updater.
    pub last_updater: Option<UserId>,
    /// When the file was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the file was last updated.
    pub updated_at: Option<DateTime<Utc>>,
    /// Overlaid from the favorites list; not part of the drive itself.
    #[serde(default)]
    pub is_favorite: bool,
    /// Owning drive.
    pub drive_id: Option<DriveId>,
}

impl FileRecord {
    /// Create a record with type and icon derived from `name`.
    pub fn new(id: impl Into<FileId>, source_id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let file_type = file_type_of(&name);
        let icon = icon_for_type(&file_type).to_string();
        Self {
            id: id.into(),
            source_id: source_id.into(),
            name,
            file_type,
            size: 0,
            icon,
            creator: None,
            last_updater: None,
            created_at: None,
            updated_at: None,
            is_favorite: false,
            drive_id: None,
        }
    }

    /// Category derived from the file type.
    pub fn category(&self) -> FileCategory {
        FileCategory::from_extension(&self.file_type)
    }

    /// Human readable size in megabytes with one decimal, e.g. `"1.5MB"`.
    pub fn size_label(&self) -> String {
        format!("{:.1}MB", self.size as f64 / 1024.0 / 1024.0)
    }
}
