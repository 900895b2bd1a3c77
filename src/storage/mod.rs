//! 블롭/파일 스토리지 추상화
//!
//! 프로필 이미지 저장에 사용됩니다. 경로는 스토리지 루트 기준의 상대 경로(`profiles/{id}`)입니다.
//!
//! ```rust,ignore
//! storage.upload_bytes(&bytes, "profiles/abc", true).await?;
//! let image = storage.read_as_bytes("profiles/abc").await?;
//! ```

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::core::errors::{AppError, AppResult};

pub mod file_system;

pub use file_system::FileSystemStorageProvider;

pub type StorageReader = Box<dyn AsyncRead + Send + Unpin>;

#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// 파일을 삭제합니다. 없으면 아무 일도 하지 않습니다.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// 파일을 읽기 스트림으로 엽니다. 없으면 `Ok(None)`.
    async fn read(&self, path: &str) -> AppResult<Option<StorageReader>>;

    /// 스트림 내용을 파일로 저장합니다.
    ///
    /// `overwrite = false`인데 파일이 이미 있으면 `StorageError`.
    async fn upload(&self, reader: StorageReader, path: &str, overwrite: bool) -> AppResult<()>;

    async fn read_as_bytes(&self, path: &str) -> AppResult<Option<Vec<u8>>> {
        let Some(mut reader) = self.read(path).await? else {
            return Ok(None);
        };

        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .await
            .map_err(|e| AppError::StorageError(format!("{}: {}", path, e)))?;
        Ok(Some(content))
    }

    async fn read_as_string(&self, path: &str) -> AppResult<Option<String>> {
        match self.read_as_bytes(path).await? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| AppError::StorageError(format!("{}: {}", path, e))),
            None => Ok(None),
        }
    }

    async fn upload_bytes(&self, content: &[u8], path: &str, overwrite: bool) -> AppResult<()> {
        let reader: StorageReader = Box::new(std::io::Cursor::new(content.to_vec()));
        self.upload(reader, path, overwrite).await
    }
}
