use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::identifiers::IdentifierError;
use crate::infrastructure::filesystem::binary_store::StoreError;

/// Errors surfaced by the depository core.
///
/// Every operation of the hierarchical services resolves to either a value
/// or exactly one of these variants. Transport layers map
/// [`DepositoryError::category`] to their own response signals.
#[derive(Error, Debug)]
pub enum DepositoryError {
    #[error("Invalid identifier: {field} - {message}")]
    InvalidIdentifier {
        field: String,
        message: String,
        value: Option<String>,
    },

    #[error("Project '{project_id}' does not exist")]
    ProjectNotFound { project_id: String },

    #[error("Branch '{branch_name}' does not exist in project '{project_id}'")]
    BranchNotFound {
        project_id: String,
        branch_name: String,
    },

    #[error("Document '{uri}' does not exist in branch '{branch_name}' in project '{project_id}'")]
    DocumentNotFound {
        project_id: String,
        branch_name: String,
        uri: String,
    },

    #[error("Document '{uri}' already exists in branch '{branch_name}' in project '{project_id}'")]
    DocumentAlreadyExists {
        project_id: String,
        branch_name: String,
        uri: String,
    },

    #[error("Storage operation failed: {message}")]
    StorageFailure {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Coarse classification of [`DepositoryError`] for transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed, empty or unsafe identifier
    BadRequest,
    /// A project, branch or document is missing
    NotFound,
    /// The target document already exists
    Conflict,
    /// Unclassified I/O failure
    Storage,
    /// Configuration could not be loaded or is invalid
    Configuration,
}

impl DepositoryError {
    pub fn invalid_identifier(
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self::InvalidIdentifier {
            field: field.into(),
            message: message.into(),
            value,
        }
    }

    pub fn project_not_found(project_id: impl Into<String>) -> Self {
        Self::ProjectNotFound {
            project_id: project_id.into(),
        }
    }

    pub fn branch_not_found(project_id: impl Into<String>, branch_name: impl Into<String>) -> Self {
        Self::BranchNotFound {
            project_id: project_id.into(),
            branch_name: branch_name.into(),
        }
    }

    pub fn document_not_found(
        project_id: impl Into<String>,
        branch_name: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self::DocumentNotFound {
            project_id: project_id.into(),
            branch_name: branch_name.into(),
            uri: uri.into(),
        }
    }

    pub fn document_already_exists(
        project_id: impl Into<String>,
        branch_name: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self::DocumentAlreadyExists {
            project_id: project_id.into(),
            branch_name: branch_name.into(),
            uri: uri.into(),
        }
    }

    pub fn storage_failure(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::StorageFailure {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn storage_failure_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::StorageFailure {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidIdentifier { .. } => ErrorCategory::BadRequest,
            Self::ProjectNotFound { .. }
            | Self::BranchNotFound { .. }
            | Self::DocumentNotFound { .. } => ErrorCategory::NotFound,
            Self::DocumentAlreadyExists { .. } => ErrorCategory::Conflict,
            Self::StorageFailure { .. } => ErrorCategory::Storage,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }
}

impl From<IdentifierError> for DepositoryError {
    fn from(error: IdentifierError) -> Self {
        Self::invalid_identifier(error.field(), error.to_string(), error.value())
    }
}

impl From<StoreError> for DepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(path) => {
                Self::storage_failure("Storage entry disappeared during operation", Some(path))
            }
            StoreError::Io { path, source } => {
                Self::storage_failure_with_source("File system operation failed", Some(path), source)
            }
        }
    }
}
