//! Provider payload shapes for the "list hierarchy" endpoint.
//!
//! The backend answers with one envelope per connected account, each
//! holding that account's drives. Two drive shapes occur in the wild:
//! the folders of a drive hang either under `root.folders` (alongside the
//! files of the drive root) or directly under `folders`. Every field is
//! optional and decoded through [`lenient`].

pub mod lenient;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One connected account and its drives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DriveEnvelope {
    /// Stable account identifier, when the backend provides one.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub api_id: Option<String>,
    /// Account row index on the backend.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub api_idx: Option<String>,
    /// Display title of the account, e.g. `"Dooray"`.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub api_title: Option<String>,
    /// Drives of the account.
    #[serde(deserialize_with = "lenient::vec")]
    pub drives: Vec<SourceDrive>,
}

/// A drive inside an envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceDrive {
    /// Provider drive id.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    /// Drive name.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    /// Project the drive belongs to.
    #[serde(deserialize_with = "lenient::opt_object")]
    pub project: Option<SourceProject>,
    /// Root folder holding top-level folders and root files.
    #[serde(deserialize_with = "lenient::opt_object")]
    pub root: Option<SourceFolder>,
    /// Top-level folders, for payloads without a `root` wrapper.
    #[serde(deserialize_with = "lenient::vec")]
    pub folders: Vec<SourceFolder>,
}

impl SourceDrive {
    /// Top-level folders from whichever shape the payload used.
    pub fn top_folders(&self) -> impl Iterator<Item = &SourceFolder> {
        self.root
            .iter()
            .flat_map(SourceFolder::children)
            .chain(self.folders.iter())
    }

    /// Files stored directly in the drive root.
    pub fn root_files(&self) -> &[SourceFile] {
        self.root.as_ref().map_or(&[], |root| root.files.as_slice())
    }
}

/// Project reference of a drive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceProject {
    /// Project id.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
}

/// A folder with its nested folders and files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceFolder {
    /// Provider folder id.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    /// Folder name.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    /// Child folders.
    #[serde(deserialize_with = "lenient::vec")]
    pub sub_folders: Vec<SourceFolder>,
    /// Child folders under the key root folders use.
    #[serde(deserialize_with = "lenient::vec")]
    pub folders: Vec<SourceFolder>,
    /// Files directly in this folder.
    #[serde(deserialize_with = "lenient::vec")]
    pub files: Vec<SourceFile>,
}

impl SourceFolder {
    /// Child folders from both keys, `folders` first.
    pub fn children(&self) -> impl Iterator<Item = &SourceFolder> {
        self.folders.iter().chain(self.sub_folders.iter())
    }
}

/// A file listed by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceFile {
    /// Provider file id.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    /// File name including extension.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    /// Size in bytes.
    #[serde(deserialize_with = "lenient::opt_u64")]
    pub size: Option<u64>,
    /// Creator member id.
    #[serde(deserialize_with = "lenient::opt_member")]
    pub creator: Option<String>,
    /// Last updater member id.
    #[serde(deserialize_with = "lenient::opt_member")]
    pub last_updater: Option<String>,
    /// Creation time.
    #[serde(deserialize_with = "lenient::opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(deserialize_with = "lenient::opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Owning drive, when the provider reports it per file.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub drive_id: Option<String>,
}
