use std::sync::Arc;

use crate::application::validators::ExistenceValidator;
use crate::common::result::DepositoryResult;
use crate::domain::entities::hierarchy::Branch;
use crate::domain::value_objects::identifiers::BranchName;
use crate::infrastructure::filesystem::binary_store::BinaryStore;

/// Read access to the branches of a project
pub struct BranchesService {
    store: Arc<dyn BinaryStore>,
    validator: Arc<ExistenceValidator>,
}

impl BranchesService {
    pub fn new(store: Arc<dyn BinaryStore>, validator: Arc<ExistenceValidator>) -> Self {
        Self { store, validator }
    }

    /// Branches of an existing project, sorted by name
    pub async fn list(&self, project_id: &str) -> DepositoryResult<Vec<Branch>> {
        tracing::debug!(project_id, "listing branches");
        let project = self.validator.project_must_exist(project_id).await?;

        let names = self.store.list_directories(project.path()).await?;
        Ok(names
            .into_iter()
            .filter(|name| BranchName::new(name).is_ok())
            .map(|name| Branch::new(project.id().as_str(), name))
            .collect())
    }

    pub async fn get(&self, project_id: &str, branch_name: &str) -> DepositoryResult<Branch> {
        tracing::debug!(project_id, branch_name, "getting branch");
        let branch = self
            .validator
            .ancestors_must_exist(project_id, branch_name)
            .await?;
        Ok(Branch::new(
            branch.project_id().as_str(),
            branch.name().as_str(),
        ))
    }
}
