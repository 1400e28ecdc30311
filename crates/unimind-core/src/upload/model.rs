//! Upload domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Identifier of a pending upload.
///
/// Random (UUID v4) so that re-selecting an identical file never collides
/// with the earlier entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadId(String);

impl UploadId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for UploadId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a raw file's bytes live.
#[derive(Debug, Clone)]
pub enum FileContent {
    /// Bytes already in memory (drag and drop, tests).
    Bytes(Arc<[u8]>),
    /// A file on disk, read when the file is ingested.
    Path(PathBuf),
}

/// A user-selected file as delivered by the file picker or drop target.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: String,
    pub mime_type: String,
    /// Size in bytes
    pub size: u64,
    /// Last modification time, if the source reports one
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
    pub content: FileContent,
}

impl RawFile {
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            modified: None,
            content: FileContent::Bytes(bytes.into()),
        }
    }

    pub fn on_disk(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            modified: None,
            content: FileContent::Path(path.into()),
        }
    }

    /// Describes a file on disk without reading it.
    ///
    /// The MIME type is guessed from the extension; unknown extensions map
    /// to `application/octet-stream`, which ingestion skips.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            name,
            mime_type,
            size: metadata.len(),
            modified: metadata.modified().ok().map(chrono::DateTime::from),
            content: FileContent::Path(path.to_path_buf()),
        })
    }

    pub fn with_modified(mut self, modified: chrono::DateTime<chrono::Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Reads the file's bytes.
    pub async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.content {
            FileContent::Bytes(bytes) => Ok(bytes.to_vec()),
            FileContent::Path(path) => tokio::fs::read(path).await,
        }
    }
}

/// A file awaiting or undergoing analysis.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub id: UploadId,
    /// Shared handle to the selected file; bytes are not copied.
    pub file: Arc<RawFile>,
    /// Percentage 0..=100, never decreasing.
    pub progress: u8,
}

impl PendingUpload {
    pub fn new(file: Arc<RawFile>) -> Self {
        Self {
            id: UploadId::new(),
            file,
            progress: 0,
        }
    }

    /// Eligible for analysis once progress reaches 100.
    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }
}

/// Upload session state.
///
/// `Idle -> FilesPending -> Analyzing -> Idle` on success; a failed commit
/// returns to `FilesPending` with the set retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadPhase {
    Idle,
    FilesPending,
    Analyzing,
}

/// Formats a byte count for display ("0 Bytes", "1.5 KB", "2 MB").
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[exponent])
}
