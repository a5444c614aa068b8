//! Validated identifiers and content type lookup

pub mod content_type;
pub mod identifiers;

pub use content_type::{ContentTypeResolver, DEFAULT_CONTENT_TYPE};
pub use identifiers::{BranchName, DocumentUri, IdentifierError, ProjectId};
