use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs as async_fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;
use walkdir::WalkDir;

use crate::domain::value_objects::identifiers::RESERVED_SEGMENT_PREFIX;

/// Prefix of in-flight temp files; such entries are hidden from listings
pub const TEMP_FILE_PREFIX: &str = RESERVED_SEGMENT_PREFIX;

/// Binary store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Classify an I/O error; missing entries become `NotFound`
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            ErrorKind::NotFound | ErrorKind::NotADirectory => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Raw byte storage addressed by physical path
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BinaryStore: Send + Sync {
    /// Read a regular file
    async fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError>;

    /// Create or replace a file; readers see either the old or the new content
    async fn write(&self, path: &Path, content: &[u8]) -> Result<(), StoreError>;

    /// Remove a regular file
    async fn delete(&self, path: &Path) -> Result<(), StoreError>;

    async fn exists(&self, path: &Path) -> bool;

    async fn is_directory(&self, path: &Path) -> bool;

    async fn is_file(&self, path: &Path) -> bool;

    /// Sorted names of the direct subdirectories
    async fn list_directories(&self, path: &Path) -> Result<Vec<String>, StoreError>;

    /// Sorted paths of all regular files below `path`, relative to it.
    ///
    /// Symlinks are followed, matching `read` and `is_file`. Broken links and
    /// link cycles are skipped.
    async fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>, StoreError>;
}

/// [`BinaryStore`] on the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FileSystemStore;

impl FileSystemStore {
    pub fn new() -> Self {
        Self
    }

    /// Sibling temp file; its name does not grow with the target name
    fn temp_path(path: &Path) -> PathBuf {
        path.with_file_name(format!("{}{}", TEMP_FILE_PREFIX, Uuid::new_v4()))
    }

    async fn write_temp(temp_path: &Path, content: &[u8]) -> std::io::Result<()> {
        let mut file = async_fs::File::create(temp_path).await?;
        file.write_all(content).await?;
        file.sync_all().await?;
        Ok(())
    }

    async fn regular_file_metadata(path: &Path) -> Result<std::fs::Metadata, StoreError> {
        let metadata = async_fs::metadata(path)
            .await
            .map_err(|e| StoreError::from_io(path, e))?;
        if metadata.is_file() {
            Ok(metadata)
        } else {
            Err(StoreError::NotFound(path.to_path_buf()))
        }
    }
}

#[async_trait]
impl BinaryStore for FileSystemStore {
    async fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        Self::regular_file_metadata(path).await?;
        async_fs::read(path)
            .await
            .map_err(|e| StoreError::from_io(path, e))
    }

    async fn write(&self, path: &Path, content: &[u8]) -> Result<(), StoreError> {
        let parent = path.parent().ok_or_else(|| StoreError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(ErrorKind::InvalidInput, "path has no parent directory"),
        })?;

        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;

        let temp_path = Self::temp_path(path);
        if let Err(e) = Self::write_temp(&temp_path, content).await {
            let _ = async_fs::remove_file(&temp_path).await;
            return Err(StoreError::Io {
                path: temp_path,
                source: e,
            });
        }

        if let Err(e) = async_fs::rename(&temp_path, path).await {
            let _ = async_fs::remove_file(&temp_path).await;
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }

        tracing::trace!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(())
    }

    async fn delete(&self, path: &Path) -> Result<(), StoreError> {
        Self::regular_file_metadata(path).await?;
        async_fs::remove_file(path)
            .await
            .map_err(|e| StoreError::from_io(path, e))?;
        tracing::trace!(path = %path.display(), "deleted file");
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        async_fs::symlink_metadata(path).await.is_ok()
    }

    async fn is_directory(&self, path: &Path) -> bool {
        async_fs::metadata(path)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false)
    }

    async fn is_file(&self, path: &Path) -> bool {
        async_fs::metadata(path)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
    }

    async fn list_directories(&self, path: &Path) -> Result<Vec<String>, StoreError> {
        let mut entries = async_fs::read_dir(path)
            .await
            .map_err(|e| StoreError::from_io(path, e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::from_io(path, e))?
        {
            let is_dir = entry
                .file_type()
                .await
                .map(|file_type| file_type.is_dir())
                .unwrap_or(false);
            if is_dir {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        names.sort();
        Ok(names)
    }

    async fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>, StoreError> {
        if !self.is_directory(path).await {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }

        let base = path.to_path_buf();
        let walk = tokio::task::spawn_blocking(move || -> Result<Vec<PathBuf>, StoreError> {
            let mut files = Vec::new();
            for entry in WalkDir::new(&base).min_depth(1).follow_links(true) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) if is_skippable_walk_error(&e) => {
                        tracing::debug!(error = %e, "skipping unreadable link");
                        continue;
                    }
                    Err(e) => {
                        let entry_path = e.path().unwrap_or(base.as_path()).to_path_buf();
                        return Err(StoreError::Io {
                            path: entry_path,
                            source: e.into(),
                        });
                    }
                };

                if !entry.file_type().is_file() {
                    continue;
                }
                if entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with(TEMP_FILE_PREFIX)
                {
                    continue;
                }
                if let Ok(relative) = entry.path().strip_prefix(&base) {
                    files.push(relative.to_path_buf());
                }
            }
            files.sort();
            Ok(files)
        });

        walk.await.map_err(|e| StoreError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?
    }
}

/// Dangling symlinks and symlink cycles
fn is_skippable_walk_error(error: &walkdir::Error) -> bool {
    error.loop_ancestor().is_some()
        || error
            .io_error()
            .is_some_and(|e| e.kind() == ErrorKind::NotFound)
}
