//! Real file system implementation.

use std::io::ErrorKind;
use std::path::Path;

use arbor_application::ports::{FileSystem, FileSystemError};
use tokio::fs;

/// Real file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn map_io_error(path: &Path, e: std::io::Error) -> FileSystemError {
    match e.kind() {
        ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => FileSystemError::PermissionDenied(path.to_path_buf()),
        _ => FileSystemError::Io(e),
    }
}

impl FileSystem for TokioFileSystem {
    async fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
        fs::read_to_string(path)
            .await
            .map_err(|e| map_io_error(path, e))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io_error(parent, e))?;
        }
        fs::write(path, contents)
            .await
            .map_err(|e| map_io_error(path, e))
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok()
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<(), FileSystemError> {
        fs::rename(from, to).await.map_err(|e| map_io_error(from, e))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("deeper").join("file.json");
        let fs = TokioFileSystem::new();

        fs.write_file(&path, b"{}").await.unwrap();
        assert!(fs.exists(&path).await);
        assert_eq!(fs.read_file_string(&path).await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.json");
        let result = TokioFileSystem::new().read_file_string(&path).await;
        assert!(matches!(result, Err(FileSystemError::NotFound(p)) if p == path));
    }

    #[tokio::test]
    async fn test_rename_replaces_destination() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("a.tmp");
        let to = temp.path().join("a.json");
        let fs = TokioFileSystem::new();
        fs.write_file(&to, b"old").await.unwrap();
        fs.write_file(&from, b"new").await.unwrap();

        fs.rename(&from, &to).await.unwrap();
        assert!(!fs.exists(&from).await);
        assert_eq!(fs.read_file_string(&to).await.unwrap(), "new");
    }
}
