pub mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::exit;
use tracing_subscriber::EnvFilter;

use crate::application::Depository;
use crate::common::error::{DepositoryError, ErrorCategory};
use crate::domain::entities::depository_config::{DepositoryConfig, DEFAULT_LOG_FILTER};
use crate::infrastructure::filesystem::config_store::{ConfigStore, CONFIG_FILE_NAME};

use commands::{BranchesCommand, DocumentContent, DocumentsCommand, InitCommand, ProjectsCommand};

/// docdepot - A hierarchical document depository
#[derive(Parser)]
#[command(name = "docdepot")]
#[command(about = "Store documents by project, branch and path")]
#[command(version)]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), " ", env!("BUILD_DATE"), ")"))]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to ./docdepot.yaml when present)
    #[arg(long, global = true, env = "DOCDEPOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Storage root, overriding the configuration file
    #[arg(long, global = true, env = "DOCDEPOT_ROOT")]
    pub root: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default docdepot.yaml
    Init {
        /// Directory where to create the docdepot.yaml file (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Force overwrite existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Inspect projects
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },

    /// Inspect the branches of a project
    Branches {
        #[command(subcommand)]
        action: BranchesAction,
    },

    /// Read and modify documents
    Documents {
        #[command(subcommand)]
        action: DocumentsAction,
    },
}

#[derive(Subcommand)]
pub enum ProjectsAction {
    /// List all projects
    List {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single project
    Show {
        project: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum BranchesAction {
    /// List the branches of a project
    List {
        project: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single branch
    Show {
        project: String,
        branch: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum DocumentsAction {
    /// List every document of a branch
    List {
        project: String,
        branch: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a document
    Get {
        project: String,
        branch: String,
        uri: String,

        /// Write the content to this file instead of stdout
        #[arg(short, long, conflicts_with = "json")]
        output: Option<PathBuf>,

        /// Print the document record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new document
    Create {
        project: String,
        branch: String,
        uri: String,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// Replace the content of an existing document
    Update {
        project: String,
        branch: String,
        uri: String,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// Delete a document
    Delete {
        project: String,
        branch: String,
        uri: String,
    },
}

/// Source of document content
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ContentArgs {
    /// Read the content from this file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Use this text as the content
    #[arg(short, long)]
    pub content: Option<String>,
}

impl ContentArgs {
    fn to_document_content(&self) -> DocumentContent {
        match (&self.file, &self.content) {
            (Some(file), _) => DocumentContent::File(file.clone()),
            (None, Some(text)) => DocumentContent::Text(text.clone()),
            (None, None) => DocumentContent::Text(String::new()),
        }
    }
}

/// Process exit code for a failed command
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<DepositoryError>().map(DepositoryError::category) {
        Some(ErrorCategory::BadRequest) => 2,
        Some(ErrorCategory::NotFound) => 3,
        Some(ErrorCategory::Conflict) => 4,
        Some(ErrorCategory::Storage) | Some(ErrorCategory::Configuration) | None => 1,
    }
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub async fn run(self) -> Result<()> {
        // Set up colored output
        colored::control::set_override(!self.cli.no_color);

        let config = self.load_config();
        let filter = match &config {
            Ok(config) => config.logging.filter.as_str(),
            Err(_) => DEFAULT_LOG_FILTER,
        };
        self.init_tracing(filter);

        let result = match config {
            Ok(config) => self.handle_command(config).await,
            Err(e) => Err(e.into()),
        };

        if let Err(e) = result {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit(exit_code(&e));
        }

        Ok(())
    }

    /// RUST_LOG wins, then --verbose, then the configured filter
    fn init_tracing(&self, configured: &str) {
        let fallback = if self.cli.verbose { "debug" } else { configured };
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    fn load_config(&self) -> crate::Result<DepositoryConfig> {
        let default_path = Path::new(CONFIG_FILE_NAME);
        let config_path = match &self.cli.config {
            Some(path) => Some(path.as_path()),
            None if default_path.is_file() => Some(default_path),
            None => None,
        };

        let mut config = ConfigStore::new().read_or_default(config_path)?;
        if let Some(root) = &self.cli.root {
            config.storage.root_dir = root.clone();
        }
        Ok(config)
    }

    async fn handle_command(&self, config: DepositoryConfig) -> Result<()> {
        if let Commands::Init { path, force } = &self.cli.command {
            return InitCommand::new(path.clone(), *force, self.cli.root.clone()).execute();
        }

        let depository = Depository::open(&config).await?;
        tracing::debug!(root = %depository.root().display(), "using storage root");

        match &self.cli.command {
            Commands::Init { .. } => Ok(()),
            Commands::Projects { action } => {
                let command = ProjectsCommand::new(&depository);
                match action {
                    ProjectsAction::List { json } => command.list(*json).await,
                    ProjectsAction::Show { project, json } => command.show(project, *json).await,
                }
            }
            Commands::Branches { action } => {
                let command = BranchesCommand::new(&depository);
                match action {
                    BranchesAction::List { project, json } => command.list(project, *json).await,
                    BranchesAction::Show {
                        project,
                        branch,
                        json,
                    } => command.show(project, branch, *json).await,
                }
            }
            Commands::Documents { action } => {
                let command = DocumentsCommand::new(&depository, self.cli.verbose);
                match action {
                    DocumentsAction::List {
                        project,
                        branch,
                        json,
                    } => command.list(project, branch, *json).await,
                    DocumentsAction::Get {
                        project,
                        branch,
                        uri,
                        output,
                        json,
                    } => {
                        command
                            .get(project, branch, uri, output.as_deref(), *json)
                            .await
                    }
                    DocumentsAction::Create {
                        project,
                        branch,
                        uri,
                        content,
                    } => {
                        command
                            .create(project, branch, uri, content.to_document_content())
                            .await
                    }
                    DocumentsAction::Update {
                        project,
                        branch,
                        uri,
                        content,
                    } => {
                        command
                            .update(project, branch, uri, content.to_document_content())
                            .await
                    }
                    DocumentsAction::Delete {
                        project,
                        branch,
                        uri,
                    } => command.delete(project, branch, uri).await,
                }
            }
        }
    }
}
