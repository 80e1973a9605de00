//! Local disk storage for uploaded question documents.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid file name: {0}")]
    InvalidName(String),
    #[error("File not found: {0}")]
    NotFound(String),
}

/// Stores uploaded files in a single flat directory.
///
/// Files are kept so they can be inspected and re-parsed later. Each one is
/// stored as `{uuid}-{sanitized original name}`.
pub struct UploadStorage {
    root: PathBuf,
}

impl UploadStorage {
    /// Open the upload directory, creating it if needed.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Save an upload and return the name it is stored under.
    pub async fn save(&self, filename: &str, content: &[u8]) -> Result<String, StorageError> {
        let stored_name = Self::make_stored_name(filename);
        tokio::fs::write(self.path_for(&stored_name)?, content).await?;

        tracing::info!("Stored upload {} as {}", filename, stored_name);
        Ok(stored_name)
    }

    /// Read a stored upload.
    pub async fn read(&self, stored_name: &str) -> Result<Vec<u8>, StorageError> {
        match tokio::fs::read(self.path_for(stored_name)?).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(stored_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a stored upload. Returns false if it was already gone.
    pub async fn delete(&self, stored_name: &str) -> Result<bool, StorageError> {
        match tokio::fs::remove_file(self.path_for(stored_name)?).await {
            Ok(()) => {
                tracing::info!("Deleted upload {}", stored_name);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a stored upload exists.
    pub async fn exists(&self, stored_name: &str) -> Result<bool, StorageError> {
        Ok(tokio::fs::try_exists(self.path_for(stored_name)?).await?)
    }

    /// Delete every stored upload and return how many were removed.
    pub async fn clear(&self) -> Result<usize, StorageError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                tokio::fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }

        tracing::info!("Cleared {} uploads", removed);
        Ok(removed)
    }

    /// Generate the stored name for an upload.
    ///
    /// Format: `{uuid}-{file name}`
    pub fn make_stored_name(filename: &str) -> String {
        format!("{}-{}", Uuid::new_v4(), sanitize_filename(filename))
    }

    fn path_for(&self, stored_name: &str) -> Result<PathBuf, StorageError> {
        let valid = !stored_name.is_empty()
            && stored_name != "."
            && stored_name != ".."
            && !stored_name.contains(['/', '\\']);
        if !valid {
            return Err(StorageError::InvalidName(stored_name.to_string()));
        }
        Ok(self.root.join(stored_name))
    }
}

/// Keep the last path component and replace anything unusual with `_`.
fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("quiz week 1.txt"), "quiz_week_1.txt");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\docs\\q.txt"), "q.txt");
        assert_eq!(sanitize_filename(".."), "upload");
        assert_eq!(sanitize_filename(""), "upload");
    }

    #[test]
    fn test_make_stored_name() {
        let name = UploadStorage::make_stored_name("q.txt");
        assert!(name.ends_with("-q.txt"));
        assert_eq!(name.len(), 36 + "-q.txt".len());
    }

    #[tokio::test]
    async fn test_save_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::new(dir.path().join("uploads")).await.unwrap();

        let stored = storage.save("q.txt", b"1. Q\nA) a\nB) b").await.unwrap();
        assert!(storage.exists(&stored).await.unwrap());
        assert_eq!(storage.read(&stored).await.unwrap(), b"1. Q\nA) a\nB) b");

        assert!(storage.delete(&stored).await.unwrap());
        assert!(!storage.delete(&stored).await.unwrap());
        assert!(matches!(
            storage.read(&stored).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::new(dir.path()).await.unwrap();

        assert!(matches!(
            storage.read("../secret").await,
            Err(StorageError::InvalidName(_))
        ));
        assert!(matches!(
            storage.delete("..").await,
            Err(StorageError::InvalidName(_))
        ));
    }

    #[tokio::test]
    async fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::new(dir.path()).await.unwrap();
        storage.save("a.txt", b"a").await.unwrap();
        storage.save("b.txt", b"b").await.unwrap();

        assert_eq!(storage.clear().await.unwrap(), 2);
        assert_eq!(storage.clear().await.unwrap(), 0);
    }
}
