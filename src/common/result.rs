use std::path::PathBuf;

use crate::common::error::DepositoryError;

/// Result alias used throughout the depository core.
///
/// # Examples
///
/// ```
/// use docdepot::common::result::DepositoryResult;
/// use docdepot::common::error::DepositoryError;
///
/// fn lookup(found: bool) -> DepositoryResult<&'static str> {
///     if found {
///         Ok("index.md")
///     } else {
///         Err(DepositoryError::project_not_found("docs"))
///     }
/// }
///
/// assert!(lookup(true).is_ok());
/// assert!(lookup(false).is_err());
/// ```
pub type DepositoryResult<T> = Result<T, DepositoryError>;

/// Conversion helpers from I/O results to [`DepositoryResult`].
pub trait ResultExt<T> {
    /// Wrap an I/O error as a `StorageFailure` carrying the path involved.
    ///
    /// ```
    /// use docdepot::common::result::{DepositoryResult, ResultExt};
    /// use std::path::PathBuf;
    ///
    /// let result: Result<(), std::io::Error> = Err(std::io::Error::new(
    ///     std::io::ErrorKind::PermissionDenied, "denied"
    /// ));
    /// let mapped: DepositoryResult<()> =
    ///     result.with_storage_failure("Cannot create root", Some(PathBuf::from("/srv/docs")));
    /// assert!(mapped.is_err());
    /// ```
    fn with_storage_failure(
        self,
        message: impl Into<String>,
        path: Option<PathBuf>,
    ) -> DepositoryResult<T>;
}

impl<T> ResultExt<T> for std::io::Result<T> {
    fn with_storage_failure(
        self,
        message: impl Into<String>,
        path: Option<PathBuf>,
    ) -> DepositoryResult<T> {
        self.map_err(|e| DepositoryError::storage_failure_with_source(message, path, e))
    }
}
