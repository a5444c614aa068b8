use anyhow::Result;
use colored::Colorize;
use std::env;
use std::path::PathBuf;

use crate::common::error::DepositoryError;
use crate::domain::entities::depository_config::DepositoryConfig;
use crate::infrastructure::filesystem::config_store::{ConfigStore, CONFIG_FILE_NAME};

/// Write a default docdepot.yaml
pub struct InitCommand {
    /// Directory where to create the docdepot.yaml file
    pub path: Option<PathBuf>,
    /// Force overwrite existing file
    pub force: bool,
    /// Storage root to record instead of the default
    pub root_dir: Option<String>,
}

impl InitCommand {
    pub fn new(path: Option<PathBuf>, force: bool, root_dir: Option<String>) -> Self {
        Self {
            path,
            force,
            root_dir,
        }
    }

    /// Execute the init command
    pub fn execute(&self) -> Result<()> {
        let target_file = self.write_config()?;

        println!(
            "{} Created {}",
            "✓".green().bold(),
            target_file.display().to_string().bold()
        );
        println!();
        println!("Next steps:");
        println!("   1. Edit storage.root_dir to point at your storage directory");
        println!("   2. Create one directory per project and one subdirectory per branch");
        println!("   3. Run 'docdepot documents list <project> <branch>'");

        Ok(())
    }

    /// Write the configuration file and return its path
    pub fn write_config(&self) -> Result<PathBuf> {
        let target_dir = match &self.path {
            Some(path) => path.clone(),
            None => env::current_dir()?,
        };
        let target_file = target_dir.join(CONFIG_FILE_NAME);

        let mut config = DepositoryConfig::default();
        if let Some(root_dir) = &self.root_dir {
            config = config.with_root_dir(root_dir.clone());
        }

        let written = ConfigStore::new()
            .with_overwrite(self.force)
            .write_config(&target_file, &config)
            .map_err(DepositoryError::from)?;

        tracing::info!(path = %written.display(), "wrote configuration");
        Ok(written)
    }
}
