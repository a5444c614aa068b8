use std::sync::Arc;

use crate::application::validators::ExistenceValidator;
use crate::common::result::DepositoryResult;
use crate::domain::entities::hierarchy::Project;
use crate::domain::value_objects::identifiers::ProjectId;
use crate::infrastructure::filesystem::binary_store::{BinaryStore, StoreError};

/// Read access to projects; provisioning happens elsewhere
pub struct ProjectsService {
    store: Arc<dyn BinaryStore>,
    validator: Arc<ExistenceValidator>,
}

impl ProjectsService {
    pub fn new(store: Arc<dyn BinaryStore>, validator: Arc<ExistenceValidator>) -> Self {
        Self { store, validator }
    }

    /// All projects, sorted by id. A missing root holds no projects.
    pub async fn list(&self) -> DepositoryResult<Vec<Project>> {
        let root = self.validator.resolver().root();
        tracing::debug!(root = %root.display(), "listing projects");

        let names = match self.store.list_directories(root).await {
            Ok(names) => names,
            Err(StoreError::NotFound(_)) => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(names
            .into_iter()
            .filter(|name| ProjectId::new(name).is_ok())
            .map(Project::new)
            .collect())
    }

    pub async fn get(&self, project_id: &str) -> DepositoryResult<Project> {
        tracing::debug!(project_id, "getting project");
        let project = self.validator.project_must_exist(project_id).await?;
        Ok(Project::new(project.id().as_str()))
    }
}
