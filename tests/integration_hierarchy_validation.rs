//! Hierarchy and path safety integration tests
//!
//! The first missing level decides the error, and no identifier may
//! address anything outside the storage root.

mod common;

use pretty_assertions::assert_eq;

use common::assertion_helpers::{
    assert_branch_not_found, assert_category, assert_document_not_found, assert_project_not_found,
};
use common::mock_services::RecordingStore;
use common::test_fixtures::DepositoryFixture;
use common::test_helpers::FileSystemHelper;
use docdepot::common::error::{DepositoryError, ErrorCategory};
use docdepot::domain::entities::{Branch, DocumentPayload, Project};
use docdepot::infrastructure::filesystem::PathResolver;

#[tokio::test]
async fn test_missing_project_wins_for_every_operation() {
    let store = RecordingStore::new();
    let fixture = DepositoryFixture::with_store(store.clone());
    let documents = fixture.depository.documents();
    let payload = DocumentPayload::new("index.md", "x");

    assert_project_not_found(fixture.depository.projects().get("ghost").await, "ghost");
    assert_project_not_found(fixture.depository.branches().list("ghost").await, "ghost");
    assert_project_not_found(fixture.depository.branches().get("ghost", "main").await, "ghost");
    assert_project_not_found(documents.get("ghost", "main", "index.md").await, "ghost");
    assert_project_not_found(documents.create("ghost", "main", &payload).await, "ghost");
    assert_project_not_found(
        documents.update("ghost", "main", "index.md", &payload).await,
        "ghost",
    );
    assert_project_not_found(documents.delete("ghost", "main", "index.md").await, "ghost");
    assert_project_not_found(documents.list("ghost", "main").await, "ghost");

    // Also when the URI is blank: the project check runs first
    assert_project_not_found(documents.get("ghost", "main", "").await, "ghost");

    assert_eq!(store.writes(), 0);
    assert_eq!(store.deletes(), 0);
    assert!(FileSystemHelper::list_tree(fixture.root()).is_empty());
}

#[tokio::test]
async fn test_missing_branch_reported_after_project() {
    let fixture = DepositoryFixture::new();
    fixture.create_project("docs");
    let documents = fixture.depository.documents();

    assert_branch_not_found(documents.get("docs", "dev", "index.md").await, "dev");
    assert_branch_not_found(
        documents
            .create("docs", "dev", &DocumentPayload::new("index.md", "x"))
            .await,
        "dev",
    );
    assert_branch_not_found(documents.delete("docs", "dev", "  ").await, "dev");

    // Create never provisions a branch
    assert!(!fixture.path("docs/dev").exists());
}

#[tokio::test]
async fn test_file_in_place_of_project_or_branch() {
    let fixture = DepositoryFixture::new();
    fixture.write_file("plain", b"not a project");
    fixture.write_file("docs/main", b"not a branch");
    let documents = fixture.depository.documents();

    assert_project_not_found(documents.get("plain", "main", "x").await, "plain");
    assert_branch_not_found(documents.get("docs", "main", "x").await, "main");
}

#[tokio::test]
async fn test_uri_required_after_ancestors_exist() {
    let fixture = DepositoryFixture::docs_main();
    let documents = fixture.depository.documents();

    for uri in ["", "   ", "./", "a/.."] {
        let error = assert_category(
            documents.get("docs", "main", uri).await,
            ErrorCategory::BadRequest,
        );
        match error {
            DepositoryError::InvalidIdentifier { field, .. } => assert_eq!(field, "document_uri"),
            other => panic!("Expected InvalidIdentifier, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_traversal_inputs_are_rejected() {
    let fixture = DepositoryFixture::docs_main();
    fixture.write_file("docs/secret.txt", b"project level");
    fixture.write_file("docs/other/secret.txt", b"other branch");
    let documents = fixture.depository.documents();

    for uri in [
        "../secret.txt",
        "../../docs/secret.txt",
        "a/../../other/secret.txt",
        "..\\secret.txt",
        "/etc/passwd",
        "\\etc\\passwd",
    ] {
        assert_category(
            documents.get("docs", "main", uri).await,
            ErrorCategory::BadRequest,
        );
        assert_category(
            documents
                .create("docs", "main", &DocumentPayload::new(uri, "overwrite"))
                .await,
            ErrorCategory::BadRequest,
        );
    }

    for project in ["..", ".", "docs/main", "a\\b", "bad\0id"] {
        assert_category(
            fixture.depository.projects().get(project).await,
            ErrorCategory::BadRequest,
        );
    }
    for branch in ["..", "../other", "main/sub"] {
        assert_category(
            documents.get("docs", branch, "secret.txt").await,
            ErrorCategory::BadRequest,
        );
    }

    assert_file_content!(fixture.path("docs/secret.txt"), b"project level");
    assert_file_content!(fixture.path("docs/other/secret.txt"), b"other branch");
}

#[test]
fn test_resolved_paths_stay_below_root() {
    let resolver = PathResolver::new("/srv/depository");

    let path = resolver
        .resolve("docs", "main", Some("guide/../index.md"))
        .unwrap();
    assert_eq!(path, std::path::PathBuf::from("/srv/depository/docs/main/index.md"));
    assert_eq!(
        resolver.resolve("docs", "main", None).unwrap(),
        std::path::PathBuf::from("/srv/depository/docs/main")
    );

    for (project, branch, uri) in [
        ("..", "main", Some("x")),
        ("docs", "..", Some("x")),
        ("docs", "main", Some("../../../etc/passwd")),
        ("docs", "main", Some("/etc/passwd")),
    ] {
        assert!(
            resolver.resolve(project, branch, uri).is_err(),
            "{}/{}/{:?} should be rejected",
            project,
            branch,
            uri
        );
    }
}

#[tokio::test]
async fn test_projects_and_branches_listing() {
    let fixture = DepositoryFixture::new();
    fixture.create_branch("docs", "main");
    fixture.create_branch("docs", "release-1.0");
    fixture.create_project("api");
    fixture.write_file("README", b"not a project");

    assert_eq!(
        fixture.depository.projects().list().await.unwrap(),
        vec![Project::new("api"), Project::new("docs")]
    );
    assert_eq!(
        fixture.depository.branches().list("docs").await.unwrap(),
        vec![Branch::new("docs", "main"), Branch::new("docs", "release-1.0")]
    );
    assert!(fixture
        .depository
        .branches()
        .list("api")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_docs_main_index_scenario() {
    let fixture = DepositoryFixture::new();
    let documents = fixture.depository.documents();

    assert_project_not_found(documents.get("docs", "main", "index.md").await, "docs");

    fixture.create_project("docs");
    assert_branch_not_found(documents.get("docs", "main", "index.md").await, "main");

    fixture.create_branch("docs", "main");
    assert_document_not_found(documents.get("docs", "main", "index.md").await, "index.md");

    documents
        .create("docs", "main", &DocumentPayload::new("index.md", "# Docs"))
        .await
        .unwrap();
    let document = documents.get("docs", "main", "index.md").await.unwrap();
    assert_eq!(document.content_type, "text/markdown");
    assert_eq!(document.content, b"# Docs".to_vec());
}
