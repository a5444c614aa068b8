//! Shared error taxonomy and result helpers

pub mod error;
pub mod result;
