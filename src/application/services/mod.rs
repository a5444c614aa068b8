pub mod branches_service;
pub mod documents_service;
pub mod projects_service;

pub use branches_service::BranchesService;
pub use documents_service::DocumentsService;
pub use projects_service::ProjectsService;
