/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Path resolution below the storage root
/// - Raw byte storage on the file system
/// - Configuration files
pub mod filesystem;

// Re-export commonly used types
pub use filesystem::{
    binary_store::{BinaryStore, FileSystemStore, StoreError},
    config_store::ConfigStore,
    path_resolver::PathResolver,
};
