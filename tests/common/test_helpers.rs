//! Test helper functions and utilities

use std::path::Path;
use walkdir::WalkDir;

use docdepot::infrastructure::filesystem::binary_store::TEMP_FILE_PREFIX;

/// Helper functions for file system operations in tests
pub struct FileSystemHelper;

impl FileSystemHelper {
    /// Every regular file below `root`, as sorted `/`-separated relative paths
    pub fn list_tree(root: &Path) -> Vec<String> {
        let mut files: Vec<String> = WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry.path().strip_prefix(root).ok().map(|relative| {
                    relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned())
                        .collect::<Vec<_>>()
                        .join("/")
                })
            })
            .collect();
        files.sort();
        files
    }

    /// Leftover temp files from interrupted writes
    pub fn temp_files(root: &Path) -> Vec<String> {
        Self::list_tree(root)
            .into_iter()
            .filter(|path| {
                path.rsplit('/')
                    .next()
                    .is_some_and(|name| name.starts_with(TEMP_FILE_PREFIX))
            })
            .collect()
    }
}
