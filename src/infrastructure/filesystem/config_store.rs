use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::Validate;

use crate::common::error::DepositoryError;
use crate::domain::entities::depository_config::DepositoryConfig;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "docdepot.yaml";

/// Configuration store related errors
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("Configuration file not found at path: {0}")]
    ConfigFileNotFound(String),

    #[error("Configuration file already exists at path: {0}")]
    ConfigFileExists(String),

    #[error("Configuration file read failed: {0}")]
    ReadFailed(String),

    #[error("Configuration file write failed: {0}")]
    WriteFailed(String),

    #[error("YAML parsing failed: {0}")]
    YamlParsingFailed(String),

    #[error("YAML serialization failed: {0}")]
    YamlSerializationFailed(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(#[from] validator::ValidationErrors),

    #[error("Configuration directory creation failed: {0}")]
    DirectoryCreationFailed(String),
}

impl From<ConfigStoreError> for DepositoryError {
    fn from(error: ConfigStoreError) -> Self {
        DepositoryError::config_error_with_source("Configuration store failure", error)
    }
}

/// Reads and writes `docdepot.yaml` files
#[derive(Debug, Clone)]
pub struct ConfigStore {
    /// Whether configuration is validated after reading
    validate_on_read: bool,

    /// Whether existing files may be replaced
    overwrite_existing: bool,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            validate_on_read: true,
            overwrite_existing: false,
        }
    }

    pub fn with_overwrite(mut self, overwrite_existing: bool) -> Self {
        self.overwrite_existing = overwrite_existing;
        self
    }

    pub fn without_validation(mut self) -> Self {
        self.validate_on_read = false;
        self
    }

    /// Read configuration from a YAML file
    pub fn read_config<P: AsRef<Path>>(
        &self,
        config_path: P,
    ) -> Result<DepositoryConfig, ConfigStoreError> {
        let config_path = config_path.as_ref();

        if !config_path.exists() {
            return Err(ConfigStoreError::ConfigFileNotFound(
                config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(config_path)
            .map_err(|e| ConfigStoreError::ReadFailed(e.to_string()))?;

        let config = Self::parse_yaml(&contents)?;

        if self.validate_on_read {
            config.validate()?;
        }

        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Read configuration, falling back to defaults when no path is given
    pub fn read_or_default(
        &self,
        config_path: Option<&Path>,
    ) -> Result<DepositoryConfig, ConfigStoreError> {
        match config_path {
            Some(path) => self.read_config(path),
            None => Ok(DepositoryConfig::default()),
        }
    }

    /// Parse configuration from YAML text; an empty document yields defaults
    pub fn parse_yaml(contents: &str) -> Result<DepositoryConfig, ConfigStoreError> {
        if contents.trim().is_empty() {
            return Ok(DepositoryConfig::default());
        }
        serde_yaml::from_str(contents).map_err(|e| ConfigStoreError::YamlParsingFailed(e.to_string()))
    }

    /// Validate and write configuration to a YAML file
    pub fn write_config<P: AsRef<Path>>(
        &self,
        config_path: P,
        config: &DepositoryConfig,
    ) -> Result<PathBuf, ConfigStoreError> {
        let config_path = config_path.as_ref();

        config.validate()?;

        if config_path.exists() && !self.overwrite_existing {
            return Err(ConfigStoreError::ConfigFileExists(
                config_path.display().to_string(),
            ));
        }

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| ConfigStoreError::DirectoryCreationFailed(e.to_string()))?;
            }
        }

        let yaml_content = serde_yaml::to_string(config)
            .map_err(|e| ConfigStoreError::YamlSerializationFailed(e.to_string()))?;

        fs::write(config_path, yaml_content)
            .map_err(|e| ConfigStoreError::WriteFailed(e.to_string()))?;

        Ok(config_path.to_path_buf())
    }

    pub fn config_exists<P: AsRef<Path>>(&self, config_path: P) -> bool {
        config_path.as_ref().exists()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
