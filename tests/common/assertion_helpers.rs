//! Assertion helpers for testing

use docdepot::common::error::{DepositoryError, ErrorCategory};

/// Assert that a file exists
#[macro_export]
macro_rules! assert_file_exists {
    ($path:expr) => {
        assert!($path.exists(), "File should exist: {}", $path.display());
    };
}

/// Assert that a file does not exist
#[macro_export]
macro_rules! assert_file_not_exists {
    ($path:expr) => {
        assert!(
            !$path.exists(),
            "File should not exist: {}",
            $path.display()
        );
    };
}

/// Assert that file content matches expected bytes
#[macro_export]
macro_rules! assert_file_content {
    ($path:expr, $expected:expr) => {
        let content = std::fs::read(&$path).expect("Failed to read file");
        assert_eq!(
            content,
            $expected.to_vec(),
            "File content mismatch: {}",
            $path.display()
        );
    };
}

/// Assert that a result failed with the given category
pub fn assert_category<T: std::fmt::Debug>(
    result: Result<T, DepositoryError>,
    expected: ErrorCategory,
) -> DepositoryError {
    match result {
        Ok(value) => panic!("Expected {:?} error, got Ok({:?})", expected, value),
        Err(error) => {
            assert_eq!(
                error.category(),
                expected,
                "Unexpected error category for: {}",
                error
            );
            error
        }
    }
}

/// Assert that a result failed with `ProjectNotFound` for `project`
pub fn assert_project_not_found<T: std::fmt::Debug>(
    result: Result<T, DepositoryError>,
    project: &str,
) {
    match assert_category(result, ErrorCategory::NotFound) {
        DepositoryError::ProjectNotFound { project_id } => assert_eq!(project_id, project),
        other => panic!("Expected ProjectNotFound, got {:?}", other),
    }
}

/// Assert that a result failed with `BranchNotFound` for `branch`
pub fn assert_branch_not_found<T: std::fmt::Debug>(
    result: Result<T, DepositoryError>,
    branch: &str,
) {
    match assert_category(result, ErrorCategory::NotFound) {
        DepositoryError::BranchNotFound { branch_name, .. } => assert_eq!(branch_name, branch),
        other => panic!("Expected BranchNotFound, got {:?}", other),
    }
}

/// Assert that a result failed with `DocumentNotFound` for `uri`
pub fn assert_document_not_found<T: std::fmt::Debug>(
    result: Result<T, DepositoryError>,
    expected_uri: &str,
) {
    match assert_category(result, ErrorCategory::NotFound) {
        DepositoryError::DocumentNotFound { uri, .. } => assert_eq!(uri, expected_uri),
        other => panic!("Expected DocumentNotFound, got {:?}", other),
    }
}
