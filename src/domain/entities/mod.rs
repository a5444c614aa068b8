//! Records exchanged with callers and the configuration model

pub mod depository_config;
pub mod document;
pub mod hierarchy;

pub use depository_config::DepositoryConfig;
pub use document::{Document, DocumentPayload, DocumentSummary};
pub use hierarchy::{Branch, Project};
