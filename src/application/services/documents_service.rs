use std::sync::Arc;

use crate::application::validators::ExistenceValidator;
use crate::common::error::DepositoryError;
use crate::common::result::DepositoryResult;
use crate::domain::entities::document::{Document, DocumentPayload, DocumentSummary};
use crate::domain::value_objects::content_type::ContentTypeResolver;
use crate::domain::value_objects::identifiers::DocumentUri;
use crate::infrastructure::filesystem::binary_store::{BinaryStore, StoreError};

/// CRUD over documents inside a branch.
///
/// Every operation checks project, then branch, then the document
/// precondition before touching content. A failed check returns before any
/// write or delete is issued.
pub struct DocumentsService {
    store: Arc<dyn BinaryStore>,
    validator: Arc<ExistenceValidator>,
    content_types: ContentTypeResolver,
}

impl DocumentsService {
    pub fn new(
        store: Arc<dyn BinaryStore>,
        validator: Arc<ExistenceValidator>,
        content_types: ContentTypeResolver,
    ) -> Self {
        Self {
            store,
            validator,
            content_types,
        }
    }

    pub async fn get(
        &self,
        project_id: &str,
        branch_name: &str,
        uri: &str,
    ) -> DepositoryResult<Document> {
        tracing::debug!(project_id, branch_name, uri, "getting document");

        let branch = self
            .validator
            .ancestors_must_exist(project_id, branch_name)
            .await?;
        let uri = self.validator.uri_must_be_specified(uri)?;
        let document = self.validator.document_must_exist(&branch, uri).await?;

        let content = match self.store.read(document.path()).await {
            Ok(content) => content,
            Err(StoreError::NotFound(path)) => {
                // Removed between the existence check and the read
                tracing::warn!(path = %path.display(), "document vanished after validation");
                return Err(document.not_found());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Document {
            name: document.uri().name().to_string(),
            uri: document.uri().to_uri_string(),
            content_type: self.content_types.resolve(document.uri().name()),
            content,
        })
    }

    pub async fn create(
        &self,
        project_id: &str,
        branch_name: &str,
        document: &DocumentPayload,
    ) -> DepositoryResult<()> {
        tracing::debug!(project_id, branch_name, uri = %document.uri, "creating document");

        let branch = self
            .validator
            .ancestors_must_exist(project_id, branch_name)
            .await?;
        let uri = self.validator.uri_must_be_specified(&document.uri)?;
        let target = self.validator.document_must_not_exist(&branch, uri).await?;

        self.store.write(target.path(), &document.content).await?;

        tracing::info!(
            project_id,
            branch_name,
            uri = %target.uri(),
            bytes = document.content.len(),
            "document created"
        );
        Ok(())
    }

    /// Overwrite the content of an existing document; `document.uri` is ignored
    pub async fn update(
        &self,
        project_id: &str,
        branch_name: &str,
        uri: &str,
        document: &DocumentPayload,
    ) -> DepositoryResult<()> {
        tracing::debug!(project_id, branch_name, uri, "updating document");

        let branch = self
            .validator
            .ancestors_must_exist(project_id, branch_name)
            .await?;
        let uri = self.validator.uri_must_be_specified(uri)?;
        let target = self.validator.document_must_exist(&branch, uri).await?;

        self.store.write(target.path(), &document.content).await?;

        tracing::info!(
            project_id,
            branch_name,
            uri = %target.uri(),
            bytes = document.content.len(),
            "document updated"
        );
        Ok(())
    }

    pub async fn delete(
        &self,
        project_id: &str,
        branch_name: &str,
        uri: &str,
    ) -> DepositoryResult<()> {
        tracing::debug!(project_id, branch_name, uri, "deleting document");

        let branch = self
            .validator
            .ancestors_must_exist(project_id, branch_name)
            .await?;
        let uri = self.validator.uri_must_be_specified(uri)?;
        let target = self.validator.document_must_exist(&branch, uri).await?;

        self.store.delete(target.path()).await?;

        tracing::info!(project_id, branch_name, uri = %target.uri(), "document deleted");
        Ok(())
    }

    /// Every document of a branch, sorted by URI
    pub async fn list(
        &self,
        project_id: &str,
        branch_name: &str,
    ) -> DepositoryResult<Vec<DocumentSummary>> {
        tracing::debug!(project_id, branch_name, "listing documents");

        let branch = self
            .validator
            .ancestors_must_exist(project_id, branch_name)
            .await?;

        let files = match self.store.list_files(branch.path()).await {
            Ok(files) => files,
            Err(StoreError::NotFound(_)) => {
                return Err(DepositoryError::branch_not_found(
                    branch.project_id().as_str(),
                    branch.name().as_str(),
                ))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(files
            .iter()
            .filter_map(|relative| DocumentUri::from_relative_path(relative).ok())
            .map(|uri| DocumentSummary {
                name: uri.name().to_string(),
                uri: uri.to_uri_string(),
                content_type: self.content_types.resolve(uri.name()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::filesystem::binary_store::MockBinaryStore;
    use crate::infrastructure::filesystem::path_resolver::PathResolver;
    use std::path::PathBuf;

    fn service_with(store: MockBinaryStore) -> DocumentsService {
        let store: Arc<dyn BinaryStore> = Arc::new(store);
        let validator = Arc::new(ExistenceValidator::new(
            store.clone(),
            PathResolver::new("/depository"),
        ));
        DocumentsService::new(store, validator, ContentTypeResolver::new())
    }

    #[tokio::test]
    async fn test_get_maps_late_not_found_to_document_not_found() {
        let mut store = MockBinaryStore::new();
        store.expect_is_directory().returning(|_| true);
        store.expect_is_file().returning(|_| true);
        store
            .expect_read()
            .times(1)
            .returning(|path| Err(StoreError::NotFound(path.to_path_buf())));

        let result = service_with(store).get("docs", "main", "index.md").await;
        match result {
            Err(DepositoryError::DocumentNotFound {
                project_id,
                branch_name,
                uri,
            }) => {
                assert_eq!(project_id, "docs");
                assert_eq!(branch_name, "main");
                assert_eq!(uri, "index.md");
            }
            other => panic!("Expected DocumentNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_propagates_other_storage_failures() {
        let mut store = MockBinaryStore::new();
        store.expect_is_directory().returning(|_| true);
        store.expect_is_file().returning(|_| true);
        store.expect_read().returning(|path| {
            Err(StoreError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        });

        let result = service_with(store).get("docs", "main", "index.md").await;
        assert!(matches!(
            result,
            Err(DepositoryError::StorageFailure { source: Some(_), .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_project_never_reaches_store_content_calls() {
        let mut store = MockBinaryStore::new();
        store
            .expect_is_directory()
            .withf(|path| path == PathBuf::from("/depository/docs"))
            .times(1)
            .returning(|_| false);
        store.expect_read().never();
        store.expect_write().never();
        store.expect_delete().never();

        let service = service_with(store);
        let result = service
            .create("docs", "main", &DocumentPayload::new("a.txt", "x"))
            .await;
        assert!(matches!(result, Err(DepositoryError::ProjectNotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_conflict_does_not_write() {
        let mut store = MockBinaryStore::new();
        store.expect_is_directory().returning(|_| true);
        store.expect_exists().returning(|_| true);
        store.expect_write().never();

        let result = service_with(store)
            .create("docs", "main", &DocumentPayload::new("x", "second"))
            .await;
        assert!(matches!(
            result,
            Err(DepositoryError::DocumentAlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_requires_uri_after_branch_check() {
        let mut store = MockBinaryStore::new();
        store.expect_is_directory().times(2).returning(|_| true);
        store.expect_exists().never();
        store.expect_write().never();

        let result = service_with(store)
            .create("docs", "main", &DocumentPayload::new("  ", "content"))
            .await;
        assert!(matches!(
            result,
            Err(DepositoryError::InvalidIdentifier { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_writes_to_addressed_uri_not_payload_uri() {
        let mut store = MockBinaryStore::new();
        store.expect_is_directory().returning(|_| true);
        store.expect_is_file().returning(|_| true);
        store
            .expect_write()
            .withf(|path, content| {
                path == PathBuf::from("/depository/docs/main/guide/a.md") && content == b"new"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let payload = DocumentPayload::new("elsewhere/b.md", "new");
        service_with(store)
            .update("docs", "main", "guide/a.md", &payload)
            .await
            .unwrap();
    }
}
