//! Test fixtures for creating depository layouts

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use docdepot::application::Depository;
use docdepot::domain::value_objects::ContentTypeResolver;
use docdepot::infrastructure::filesystem::{BinaryStore, FileSystemStore};

/// A depository rooted in a temporary directory
pub struct DepositoryFixture {
    temp_dir: TempDir,
    pub depository: Depository,
}

impl DepositoryFixture {
    /// Empty storage root
    pub fn new() -> Self {
        Self::with_store(Arc::new(FileSystemStore::new()))
    }

    /// Empty storage root served through the given store
    pub fn with_store(store: Arc<dyn BinaryStore>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let depository =
            Depository::with_store(temp_dir.path(), store, ContentTypeResolver::new());
        Self {
            temp_dir,
            depository,
        }
    }

    /// Storage root holding project `docs` with branch `main`
    pub fn docs_main() -> Self {
        let fixture = Self::new();
        fixture.create_branch("docs", "main");
        fixture
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Physical path of an entry below the root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn create_project(&self, project: &str) -> PathBuf {
        let path = self.path(project);
        std::fs::create_dir_all(&path).expect("Failed to create project dir");
        path
    }

    pub fn create_branch(&self, project: &str, branch: &str) -> PathBuf {
        let path = self.path(project).join(branch);
        std::fs::create_dir_all(&path).expect("Failed to create branch dir");
        path
    }

    /// Place a file directly on disk, bypassing the services
    pub fn write_file(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}
