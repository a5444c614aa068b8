//! # docdepot - Hierarchical Document Depository
//!
//! `docdepot` stores arbitrary documents on the local filesystem, addressed
//! by project, branch and a relative document URI. Projects are directories
//! below a storage root, branches are their subdirectories and documents are
//! files (possibly nested) inside a branch.
//!
//! ## Features
//!
//! - **Hierarchy checks**: project, then branch, then document; the first
//!   missing level decides the error
//! - **Path safety**: identifiers are validated and URIs normalized so that
//!   nothing resolves outside the storage root
//! - **Atomic writes**: readers see either the old or the new content
//! - **Content types**: derived from the document extension, configurable
//!
//! ## Quick Start
//!
//! ```bash
//! docdepot init
//! mkdir -p depository/docs/main
//! docdepot documents create docs main index.md --content "# Welcome"
//! docdepot documents get docs main index.md
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: identifiers, document records, content types, configuration model
//! - [`application`]: existence validator, services and the [`application::Depository`] root
//! - [`infrastructure`]: path resolution, binary storage, configuration files
//! - [`presentation`]: CLI interface
//! - [`common`]: error taxonomy and result helpers
//!
//! ## Using the Library
//!
//! ```rust,no_run
//! use docdepot::application::Depository;
//! use docdepot::domain::entities::{DepositoryConfig, DocumentPayload};
//!
//! # async fn example() -> docdepot::Result<()> {
//! let config = DepositoryConfig::new().with_root_dir("/srv/depository");
//! let depository = Depository::open(&config).await?;
//!
//! depository
//!     .documents()
//!     .create("docs", "main", &DocumentPayload::new("index.md", "# Welcome"))
//!     .await?;
//!
//! let document = depository.documents().get("docs", "main", "index.md").await?;
//! assert_eq!(document.content_type, "text/markdown");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - [`common::error::DepositoryError`]: every failure of the core
//! - [`common::result::DepositoryResult`]: alias for `Result<T, DepositoryError>`

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::DepositoryError;
pub use crate::common::result::DepositoryResult as Result;
