use async_trait::async_trait;
use lexis_core::{FileStore, StoreError};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// [`FileStore`] over the local filesystem. Parent directories are created
/// on demand so cache and log locations need no preparation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

async fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error(parent, e)),
        _ => Ok(()),
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn read(&self, path: &Path) -> Result<String, StoreError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| io_error(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn write(&self, path: &Path, text: &str) -> Result<(), StoreError> {
        self.write_bytes(path, text.as_bytes()).await
    }

    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        ensure_parent(path).await?;
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| io_error(path, e))
    }

    async fn append(&self, path: &Path, text: &str) -> Result<(), StoreError> {
        ensure_parent(path).await?;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| io_error(path, e))?;
        file.write_all(text.as_bytes())
            .await
            .map_err(|e| io_error(path, e))?;
        file.flush().await.map_err(|e| io_error(path, e))
    }

    async fn size(&self, path: &Path) -> Option<u64> {
        let metadata = tokio::fs::metadata(path).await.ok()?;
        metadata.is_file().then(|| metadata.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("lexis_store_{}", uuid::Uuid::now_v7()))
    }

    #[tokio::test]
    async fn test_write_creates_parents_and_reads_back() {
        let dir = scratch_dir();
        let file = dir.join("cache").join("sb_cloud.xml");

        let store = LocalFileStore;
        assert!(store.write(&file, "<entry_list/>").await.is_ok());
        let Ok(text) = store.read(&file).await else {
            panic!("written file should be readable");
        };
        assert_eq!(text, "<entry_list/>");
        assert_eq!(store.size(&file).await, Some(13));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_append_accumulates() {
        let dir = scratch_dir();
        let log = dir.join("errors.log");

        let store = LocalFileStore;
        assert!(store.append(&log, "ERROR:a:>Audio Missing\n").await.is_ok());
        assert!(store.append(&log, "ERROR:b:>Audio Missing\n").await.is_ok());
        let Ok(text) = store.read(&log).await else {
            panic!("log should exist");
        };
        assert_eq!(text.lines().count(), 2);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let store = LocalFileStore;
        let missing = scratch_dir().join("nothing.dat");
        assert!(store.size(&missing).await.is_none());
        assert!(matches!(store.read(&missing).await, Err(StoreError::Io { .. })));
    }

    #[tokio::test]
    async fn test_directory_has_no_size() {
        let dir = scratch_dir();
        let _ = std::fs::create_dir_all(&dir);
        assert!(LocalFileStore.size(&dir).await.is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
