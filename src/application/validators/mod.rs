//! Existence preconditions shared by the services

pub mod existence_validator;

pub use existence_validator::{CheckedBranch, CheckedDocument, CheckedProject, ExistenceValidator};
