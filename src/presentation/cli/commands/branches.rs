use anyhow::Result;
use colored::Colorize;

use crate::application::Depository;

/// Handler for the branches commands
pub struct BranchesCommand<'a> {
    depository: &'a Depository,
}

impl<'a> BranchesCommand<'a> {
    pub fn new(depository: &'a Depository) -> Self {
        Self { depository }
    }

    pub async fn list(&self, project_id: &str, json: bool) -> Result<()> {
        let branches = self.depository.branches().list(project_id).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&branches)?);
            return Ok(());
        }

        for branch in branches {
            println!("{}", branch.name);
        }
        Ok(())
    }

    pub async fn show(&self, project_id: &str, branch_name: &str, json: bool) -> Result<()> {
        let branch = self.depository.branches().get(project_id, branch_name).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&branch)?);
        } else {
            let documents = self
                .depository
                .documents()
                .list(project_id, branch_name)
                .await?;
            println!(
                "{} {}/{}",
                "Branch:".bold(),
                branch.project_id,
                branch.name.green()
            );
            println!("  Documents: {}", documents.len());
        }
        Ok(())
    }
}
