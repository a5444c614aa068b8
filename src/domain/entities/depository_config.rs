use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::OnceLock;
use validator::{Validate, ValidationError};

use crate::domain::value_objects::content_type::{ContentTypeResolver, DEFAULT_CONTENT_TYPE};

/// Default storage root, relative to the working directory
pub const DEFAULT_ROOT_DIR: &str = "./depository";

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding one subdirectory per project
    #[validate(length(min = 1))]
    pub root_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            root_dir: DEFAULT_ROOT_DIR.to_string(),
        }
    }
}

/// Content type lookup settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContentTypeSettings {
    /// Type reported for unknown extensions
    #[validate(custom(function = "validate_content_type"))]
    pub default: String,

    /// Extension (with or without leading dot) to content type
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    #[validate(custom(function = "validate_overrides"))]
    pub overrides: BTreeMap<String, String>,
}

impl Default for ContentTypeSettings {
    fn default() -> Self {
        Self {
            default: DEFAULT_CONTENT_TYPE.to_string(),
            overrides: BTreeMap::new(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `docdepot=debug`
    #[validate(length(min = 1))]
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// docdepot.yaml configuration file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DepositoryConfig {
    #[validate(nested)]
    pub storage: StorageSettings,

    #[validate(nested)]
    pub content_types: ContentTypeSettings,

    #[validate(nested)]
    pub logging: LoggingSettings,
}

impl DepositoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_dir(mut self, root_dir: impl Into<String>) -> Self {
        self.storage.root_dir = root_dir.into();
        self
    }

    pub fn root_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.root_dir)
    }

    /// Build the content type resolver described by this configuration
    pub fn content_type_resolver(&self) -> ContentTypeResolver {
        ContentTypeResolver::new()
            .with_default(self.content_types.default.clone())
            .with_overrides(&self.content_types.overrides)
    }
}

fn content_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*/[A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*$")
            .expect("content type pattern is valid")
    })
}

fn validate_content_type(value: &str) -> Result<(), ValidationError> {
    if content_type_pattern().is_match(value) {
        Ok(())
    } else {
        let mut error = ValidationError::new("content_type");
        error.message = Some(format!("'{}' is not a type/subtype content type", value).into());
        Err(error)
    }
}

fn validate_overrides(overrides: &BTreeMap<String, String>) -> Result<(), ValidationError> {
    for (ext, content_type) in overrides {
        if ext.trim().trim_start_matches('.').is_empty() {
            let mut error = ValidationError::new("extension");
            error.message = Some("override extension cannot be empty".into());
            return Err(error);
        }
        validate_content_type(content_type)?;
    }
    Ok(())
}
