//! Store doubles for integration tests

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use docdepot::infrastructure::filesystem::{BinaryStore, FileSystemStore, StoreError};

/// Counts mutating calls while delegating to the file system
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: FileSystemStore,
    writes: AtomicUsize,
    deletes: AtomicUsize,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BinaryStore for RecordingStore {
    async fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        self.inner.read(path).await
    }

    async fn write(&self, path: &Path, content: &[u8]) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.write(path, content).await
    }

    async fn delete(&self, path: &Path) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(path).await
    }

    async fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path).await
    }

    async fn is_directory(&self, path: &Path) -> bool {
        self.inner.is_directory(path).await
    }

    async fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path).await
    }

    async fn list_directories(&self, path: &Path) -> Result<Vec<String>, StoreError> {
        self.inner.list_directories(path).await
    }

    async fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>, StoreError> {
        self.inner.list_files(path).await
    }
}
