//! Local copies of provider data.
//!
//! `fetch` stores the transformed forest so the other commands work
//! offline. A raw provider payload saved to disk can stand in for the
//! backend through [`PayloadFile`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use drivehub_core::error::{AppError, ErrorKind};
use drivehub_core::result::AppResult;
use drivehub_core::traits::source::DriveSource;
use drivehub_entity::folder::FolderNode;

/// Read the saved forest. A missing file is an empty forest.
pub async fn load_forest(path: &Path) -> AppResult<Vec<FolderNode>> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No drive snapshot yet");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&raw).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Corrupt drive snapshot {}", path.display()),
            e,
        )
    })
}

/// Write the forest, replacing any previous snapshot.
pub async fn save_forest(path: &Path, forest: &[FolderNode]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(forest)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// A provider payload read from disk.
#[derive(Debug, Clone)]
pub struct PayloadFile {
    path: PathBuf,
}

impl PayloadFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DriveSource for PayloadFile {
    async fn load_hierarchy(&self) -> AppResult<Value> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::NotFound,
                format!("Cannot read payload {}", self.path.display()),
                e,
            )
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("drive.json");
        assert!(load_forest(&path).await.unwrap().is_empty());

        let forest = vec![FolderNode::drive("d", "Team")
            .with_sub_folders(vec![FolderNode::folder("d/folder-1", "Docs")])];
        save_forest(&path, &forest).await.unwrap();
        assert_eq!(load_forest(&path).await.unwrap(), forest);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drive.json");
        tokio::fs::write(&path, "{oops").await.unwrap();
        let err = load_forest(&path).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn test_payload_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        tokio::fs::write(&path, r#"[{"apiTitle":"Dooray","drives":[]}]"#)
            .await
            .unwrap();
        let payload = PayloadFile::new(&path).load_hierarchy().await.unwrap();
        assert!(payload.is_array());

        let missing = PayloadFile::new(dir.path().join("missing.json"));
        assert!(missing.load_hierarchy().await.is_err());
    }
}
