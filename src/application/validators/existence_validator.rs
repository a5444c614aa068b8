use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::common::error::DepositoryError;
use crate::common::result::DepositoryResult;
use crate::domain::value_objects::identifiers::{BranchName, DocumentUri, ProjectId};
use crate::infrastructure::filesystem::{binary_store::BinaryStore, path_resolver::PathResolver};

/// Proof that a project directory was present when checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedProject {
    id: ProjectId,
    path: PathBuf,
}

impl CheckedProject {
    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Proof that a project and one of its branches were present when checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedBranch {
    project_id: ProjectId,
    name: BranchName,
    path: PathBuf,
}

impl CheckedBranch {
    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn name(&self) -> &BranchName {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A document location whose existence precondition has passed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedDocument {
    branch: CheckedBranch,
    uri: DocumentUri,
    path: PathBuf,
}

impl CheckedDocument {
    pub fn uri(&self) -> &DocumentUri {
        &self.uri
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Not-found error for this location, used when a later step races with a delete
    pub fn not_found(&self) -> DepositoryError {
        DepositoryError::document_not_found(
            self.branch.project_id.as_str(),
            self.branch.name.as_str(),
            self.uri.to_uri_string(),
        )
    }
}

/// Guard clauses over the binary store's probes.
///
/// Each check hands back a witness that the next level requires, so a
/// branch can only be checked under a checked project and a document only
/// under a checked branch. The first missing level decides the error.
pub struct ExistenceValidator {
    store: Arc<dyn BinaryStore>,
    resolver: PathResolver,
}

impl ExistenceValidator {
    pub fn new(store: Arc<dyn BinaryStore>, resolver: PathResolver) -> Self {
        Self { store, resolver }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub async fn project_must_exist(&self, project_id: &str) -> DepositoryResult<CheckedProject> {
        let id = ProjectId::new(project_id)?;
        let path = self.resolver.project_path(&id);

        if !self.store.is_directory(&path).await {
            return Err(DepositoryError::project_not_found(id.as_str()));
        }

        Ok(CheckedProject { id, path })
    }

    pub async fn branch_must_exist(
        &self,
        project: &CheckedProject,
        branch_name: &str,
    ) -> DepositoryResult<CheckedBranch> {
        let name = BranchName::new(branch_name)?;
        let path = self.resolver.branch_path(&project.id, &name);

        if !self.store.is_directory(&path).await {
            return Err(DepositoryError::branch_not_found(
                project.id.as_str(),
                name.as_str(),
            ));
        }

        Ok(CheckedBranch {
            project_id: project.id.clone(),
            name,
            path,
        })
    }

    /// Project check followed by branch check
    pub async fn ancestors_must_exist(
        &self,
        project_id: &str,
        branch_name: &str,
    ) -> DepositoryResult<CheckedBranch> {
        let project = self.project_must_exist(project_id).await?;
        self.branch_must_exist(&project, branch_name).await
    }

    /// Parse a document URI, rejecting blank or unsafe values
    pub fn uri_must_be_specified(&self, uri: &str) -> DepositoryResult<DocumentUri> {
        Ok(DocumentUri::parse(uri)?)
    }

    pub async fn document_must_exist(
        &self,
        branch: &CheckedBranch,
        uri: DocumentUri,
    ) -> DepositoryResult<CheckedDocument> {
        let document = self.locate(branch, uri);

        if !self.store.is_file(&document.path).await {
            return Err(document.not_found());
        }

        Ok(document)
    }

    pub async fn document_must_not_exist(
        &self,
        branch: &CheckedBranch,
        uri: DocumentUri,
    ) -> DepositoryResult<CheckedDocument> {
        let document = self.locate(branch, uri);

        if self.store.exists(&document.path).await {
            return Err(DepositoryError::document_already_exists(
                branch.project_id.as_str(),
                branch.name.as_str(),
                document.uri.to_uri_string(),
            ));
        }

        Ok(document)
    }

    fn locate(&self, branch: &CheckedBranch, uri: DocumentUri) -> CheckedDocument {
        let path = self
            .resolver
            .document_path(&branch.project_id, &branch.name, &uri);
        CheckedDocument {
            branch: branch.clone(),
            uri,
            path,
        }
    }
}
