use std::path::{Path, PathBuf};

use crate::common::result::DepositoryResult;
use crate::domain::value_objects::identifiers::{BranchName, DocumentUri, ProjectId};

/// Maps identifiers onto locations below the storage root.
///
/// Resolution is lexical only; it never touches the filesystem. Every
/// identifier is validated before it is joined, so a resolved path always
/// stays inside the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parse raw identifiers and resolve them to a physical path.
    ///
    /// Without a document URI the branch directory is returned.
    pub fn resolve(
        &self,
        project_id: &str,
        branch_name: &str,
        document_uri: Option<&str>,
    ) -> DepositoryResult<PathBuf> {
        let project_id = ProjectId::new(project_id)?;
        let branch_name = BranchName::new(branch_name)?;

        match document_uri {
            Some(uri) => {
                let uri = DocumentUri::parse(uri)?;
                Ok(self.document_path(&project_id, &branch_name, &uri))
            }
            None => Ok(self.branch_path(&project_id, &branch_name)),
        }
    }

    pub fn project_path(&self, project_id: &ProjectId) -> PathBuf {
        self.root.join(project_id.as_str())
    }

    pub fn branch_path(&self, project_id: &ProjectId, branch_name: &BranchName) -> PathBuf {
        self.project_path(project_id).join(branch_name.as_str())
    }

    pub fn document_path(
        &self,
        project_id: &ProjectId,
        branch_name: &BranchName,
        uri: &DocumentUri,
    ) -> PathBuf {
        uri.segments()
            .fold(self.branch_path(project_id, branch_name), |path, segment| {
                path.join(segment)
            })
    }
}
