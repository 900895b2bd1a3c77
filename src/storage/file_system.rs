//! 로컬 파일 시스템 스토리지
//!
//! 전체 경로는 `storage_folder/path`이며, 상대 경로이면 `site_root` 아래로 해석됩니다.
//! `..` 구성요소나 절대 경로가 포함된 `path`는 거부됩니다.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io;

use super::{StorageProvider, StorageReader};
use crate::core::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct FileSystemStorageProvider {
    site_root: PathBuf,
    storage_folder: PathBuf,
}

impl FileSystemStorageProvider {
    pub fn new(site_root: impl Into<PathBuf>, storage_folder: impl Into<PathBuf>) -> Self {
        Self {
            site_root: site_root.into(),
            storage_folder: storage_folder.into(),
        }
    }

    fn full_path(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if path.is_empty() || escapes {
            return Err(AppError::StorageError(format!("invalid storage path: {}", path)));
        }

        let full_path = self.storage_folder.join(relative);
        if full_path.is_absolute() {
            Ok(full_path)
        } else {
            Ok(self.site_root.join(full_path))
        }
    }
}

#[async_trait]
impl StorageProvider for FileSystemStorageProvider {
    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.full_path(path)?;

        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StorageError(format!("{}: {}", path, e))),
        }
    }

    async fn read(&self, path: &str) -> AppResult<Option<StorageReader>> {
        let full_path = self.full_path(path)?;

        match fs::File::open(&full_path).await {
            Ok(file) => Ok(Some(Box::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::StorageError(format!("{}: {}", path, e))),
        }
    }

    async fn upload(&self, mut reader: StorageReader, path: &str, overwrite: bool) -> AppResult<()> {
        let full_path = self.full_path(path)?;

        if let Some(directory) = full_path.parent() {
            fs::create_dir_all(directory)
                .await
                .map_err(|e| AppError::StorageError(format!("{}: {}", path, e)))?;
        }

        if !overwrite && fs::try_exists(&full_path).await.unwrap_or(false) {
            return Err(AppError::StorageError(format!("The file {} already exists", path)));
        }

        let mut output = fs::File::create(&full_path)
            .await
            .map_err(|e| AppError::StorageError(format!("{}: {}", path, e)))?;
        io::copy(&mut reader, &mut output)
            .await
            .map_err(|e| AppError::StorageError(format!("{}: {}", path, e)))?;

        log::debug!("파일 저장 완료: {}", full_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(dir: &tempfile::TempDir) -> FileSystemStorageProvider {
        FileSystemStorageProvider::new(dir.path(), "storage")
    }

    #[actix_web::test]
    async fn test_upload_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = provider(&dir);

        storage.upload_bytes(b"image-bytes", "profiles/abc", false).await.unwrap();
        assert!(dir.path().join("storage/profiles/abc").exists());
        assert_eq!(
            storage.read_as_bytes("profiles/abc").await.unwrap(),
            Some(b"image-bytes".to_vec())
        );

        storage.delete("profiles/abc").await.unwrap();
        assert!(storage.read("profiles/abc").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_overwrite_flag() {
        let dir = tempfile::tempdir().unwrap();
        let storage = provider(&dir);

        storage.upload_bytes(b"first", "a.txt", false).await.unwrap();
        let error = storage.upload_bytes(b"second", "a.txt", false).await.unwrap_err();
        assert!(error.to_string().contains("The file a.txt already exists"));

        storage.upload_bytes(b"second", "a.txt", true).await.unwrap();
        assert_eq!(storage.read_as_string("a.txt").await.unwrap(), Some("second".to_string()));
    }

    #[actix_web::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = provider(&dir);

        assert!(storage.read_as_bytes("missing").await.unwrap().is_none());
        assert!(storage.delete("missing").await.is_ok());
    }

    #[actix_web::test]
    async fn test_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let storage = provider(&dir);

        assert!(storage.upload_bytes(b"x", "../outside", true).await.is_err());
        assert!(storage.read("/etc/passwd").await.is_err());
        assert!(storage.delete("").await.is_err());
    }

    #[actix_web::test]
    async fn test_absolute_storage_folder_ignores_site_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSystemStorageProvider::new("/nonexistent-site-root", dir.path());

        storage.upload_bytes(b"x", "file", true).await.unwrap();
        assert!(dir.path().join("file").exists());
    }
}
