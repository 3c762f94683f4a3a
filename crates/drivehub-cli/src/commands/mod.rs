//! CLI command definitions and dispatch.

pub mod files;
pub mod select;
pub mod sync;
pub mod tree;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::{self, OutputFormat};
use crate::snapshot;
use drivehub_client::ApiClient;
use drivehub_core::config::AppConfig;
use drivehub_core::result::AppResult;
use drivehub_core::traits::state::StateStore;
use drivehub_service::{DriveExplorer, FileStateStore, MemoryStateStore};

/// DriveHub: browse connected drives and choose folders for search
#[derive(Debug, Parser)]
#[command(name = "drivehub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/drivehub.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Drive snapshot file (defaults to persistence.snapshot_file)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the folder tree with selection markers
    Tree(tree::TreeArgs),
    /// Flip a folder between expanded and collapsed
    Expand {
        /// Folder id
        id: String,
    },
    /// Show the check state of a folder
    Check {
        /// Folder id
        id: String,
    },
    /// Select or deselect a folder and everything below it
    Toggle {
        /// Folder id
        id: String,
    },
    /// Select or deselect a single folder
    Select {
        /// Folder id
        id: String,
    },
    /// Select every folder
    SelectAll,
    /// Deselect every folder
    Clear,
    /// List selected folders
    Selection,
    /// List files
    Files(files::FilesArgs),
    /// Search files
    Search(files::SearchArgs),
    /// Download the drive hierarchy into the snapshot
    Fetch(sync::FetchArgs),
    /// Ask the search service to reindex the selected folders
    Reindex(sync::ReindexArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        let ctx = Context::new(config, self.format, self.snapshot.clone());
        match &self.command {
            Commands::Tree(args) => tree::render(&ctx, args).await,
            Commands::Expand { id } => tree::expand(&ctx, id).await,
            Commands::Check { id } => select::check(&ctx, id).await,
            Commands::Toggle { id } => select::toggle(&ctx, id, select::Mode::Cascade).await,
            Commands::Select { id } => select::toggle(&ctx, id, select::Mode::Single).await,
            Commands::SelectAll => select::select_all(&ctx).await,
            Commands::Clear => select::clear(&ctx).await,
            Commands::Selection => select::list(&ctx).await,
            Commands::Files(args) => files::list(&ctx, args).await,
            Commands::Search(args) => files::search(&ctx, args).await,
            Commands::Fetch(args) => sync::fetch(&ctx, args).await,
            Commands::Reindex(args) => sync::reindex(&ctx, args).await,
        }
    }
}

/// Shared per-invocation state.
#[derive(Debug)]
pub struct Context {
    pub config: AppConfig,
    pub format: OutputFormat,
    pub snapshot: PathBuf,
    pub state: Arc<dyn StateStore>,
}

impl Context {
    pub fn new(config: AppConfig, format: OutputFormat, snapshot: Option<PathBuf>) -> Self {
        let state: Arc<dyn StateStore> = if config.persistence.enabled {
            Arc::new(FileStateStore::new(&config.persistence.state_dir))
        } else {
            Arc::new(MemoryStateStore::new())
        };
        let snapshot =
            snapshot.unwrap_or_else(|| PathBuf::from(&config.persistence.snapshot_file));
        Self {
            config,
            format,
            snapshot,
            state,
        }
    }

    /// Explorer over the snapshot, with saved selection and expansion
    /// applied.
    pub async fn explorer(&self) -> AppResult<DriveExplorer> {
        let mut explorer =
            DriveExplorer::new(self.state.clone(), self.config.tree.initial_selection);
        explorer.restore().await;

        let forest = snapshot::load_forest(&self.snapshot).await?;
        if forest.is_empty() {
            output::print_warning("No drive snapshot; run `drivehub fetch` first");
        }
        explorer.apply_forest(forest).await;
        Ok(explorer)
    }

    /// Client for the REST backend.
    pub fn backend(&self) -> AppResult<ApiClient> {
        ApiClient::from_backend(&self.config.backend)
    }
}

/// Fail with a not-found error unless `id` names a folder.
pub fn require_folder(explorer: &DriveExplorer, id: &str) -> AppResult<()> {
    if explorer.store().find(id).is_some() {
        Ok(())
    } else {
        Err(drivehub_core::error::AppError::not_found(format!(
            "Folder not found: {id}"
        )))
    }
}
