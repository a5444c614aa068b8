//! Common test utilities and helpers
//!
//! Shared fixtures, assertions and store doubles for the integration tests.
#![allow(dead_code)]

pub mod assertion_helpers;
pub mod mock_services;
pub mod test_fixtures;
pub mod test_helpers;
