//! File system backed storage, path resolution and configuration files

pub mod binary_store;
pub mod config_store;
pub mod path_resolver;

pub use binary_store::{BinaryStore, FileSystemStore, StoreError};
pub use config_store::{ConfigStore, ConfigStoreError, CONFIG_FILE_NAME};
pub use path_resolver::PathResolver;
