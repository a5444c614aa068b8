/// Application layer modules
///
/// This layer orchestrates the domain types over the storage layer:
/// - Existence checks in hierarchy order
/// - Projects, branches and documents services
/// - The composition root wiring them to one store
pub mod depository;
pub mod services;
pub mod validators;

pub use depository::Depository;
pub use services::{BranchesService, DocumentsService, ProjectsService};
pub use validators::ExistenceValidator;
