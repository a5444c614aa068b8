use anyhow::Result;
use colored::Colorize;

use crate::application::Depository;

/// Handler for the projects commands
pub struct ProjectsCommand<'a> {
    depository: &'a Depository,
}

impl<'a> ProjectsCommand<'a> {
    pub fn new(depository: &'a Depository) -> Self {
        Self { depository }
    }

    pub async fn list(&self, json: bool) -> Result<()> {
        let projects = self.depository.projects().list().await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&projects)?);
            return Ok(());
        }

        if projects.is_empty() {
            println!("{} No projects in {}", "::".blue().bold(), self.depository.root().display());
        }
        for project in projects {
            println!("{}", project.id);
        }
        Ok(())
    }

    pub async fn show(&self, project_id: &str, json: bool) -> Result<()> {
        let project = self.depository.projects().get(project_id).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&project)?);
        } else {
            let branches = self.depository.branches().list(project_id).await?;
            println!("{} {}", "Project:".bold(), project.id.green());
            println!("  Branches: {}", branches.len());
        }
        Ok(())
    }
}
