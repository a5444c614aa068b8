use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::{BranchesService, DocumentsService, ProjectsService};
use crate::application::validators::ExistenceValidator;
use crate::common::result::{DepositoryResult, ResultExt};
use crate::domain::entities::depository_config::DepositoryConfig;
use crate::domain::value_objects::content_type::ContentTypeResolver;
use crate::infrastructure::filesystem::{BinaryStore, FileSystemStore, PathResolver};

/// The three services wired to one store and one storage root
pub struct Depository {
    root: PathBuf,
    projects: ProjectsService,
    branches: BranchesService,
    documents: DocumentsService,
}

impl Depository {
    /// Wire the services over an arbitrary store
    pub fn with_store(
        root: impl Into<PathBuf>,
        store: Arc<dyn BinaryStore>,
        content_types: ContentTypeResolver,
    ) -> Self {
        let root = root.into();
        let validator = Arc::new(ExistenceValidator::new(
            store.clone(),
            PathResolver::new(root.clone()),
        ));

        Self {
            projects: ProjectsService::new(store.clone(), validator.clone()),
            branches: BranchesService::new(store.clone(), validator.clone()),
            documents: DocumentsService::new(store, validator, content_types),
            root,
        }
    }

    /// Open the file system depository described by `config`, creating its
    /// root directory if needed
    pub async fn open(config: &DepositoryConfig) -> DepositoryResult<Self> {
        let root = config.root_dir();

        if !tokio::fs::try_exists(&root).await.unwrap_or(false) {
            tokio::fs::create_dir_all(&root)
                .await
                .with_storage_failure("Failed to create storage root", Some(root.clone()))?;
            tracing::info!(root = %root.display(), "created storage root");
        }

        tracing::debug!(root = %root.display(), "opened depository");
        Ok(Self::with_store(
            root,
            Arc::new(FileSystemStore::new()),
            config.content_type_resolver(),
        ))
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    pub fn projects(&self) -> &ProjectsService {
        &self.projects
    }

    pub fn branches(&self) -> &BranchesService {
        &self.branches
    }

    pub fn documents(&self) -> &DocumentsService {
        &self.documents
    }
}
