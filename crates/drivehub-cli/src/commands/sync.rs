//! Commands that talk to remote services.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use crate::output::{self, OutputFormat};
use crate::snapshot::{self, PayloadFile};
use drivehub_client::{ApiClient, HttpDriveSource, HttpFavoritesStore, HttpReindexSink};
use drivehub_core::error::AppError;
use drivehub_core::result::AppResult;
use drivehub_core::traits::reindex::ReindexSink;
use drivehub_core::traits::source::DriveSource;
use drivehub_service::{
    DriveLoader, DriveTreeStore, LoadOutcome, TransformOptions, native_folder_id,
};

use super::Context;

/// Arguments for `fetch`
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Read a saved provider payload instead of calling the backend
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Drop selected folders that no longer exist
    #[arg(long)]
    pub prune: bool,
}

/// Arguments for `reindex`
#[derive(Debug, Args)]
pub struct ReindexArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

fn build_loader(ctx: &Context, from: Option<&PathBuf>) -> AppResult<DriveLoader> {
    let options = TransformOptions::from(&ctx.config.tree);
    let loader = match from {
        Some(path) => DriveLoader::new(Arc::new(PayloadFile::new(path)), options),
        None => {
            let api = ctx.backend()?;
            let source: Arc<dyn DriveSource> =
                Arc::new(HttpDriveSource::new(api.clone(), &ctx.config.backend)?);
            DriveLoader::new(source, options).with_favorites(Arc::new(HttpFavoritesStore::new(
                api,
                &ctx.config.backend,
            )?))
        }
    };
    Ok(loader)
}

/// `drivehub fetch`
pub async fn fetch(ctx: &Context, args: &FetchArgs) -> AppResult<()> {
    let loader = build_loader(ctx, args.from.as_ref())?;

    let forest = match loader.refresh().await {
        LoadOutcome::Loaded(forest) => forest,
        LoadOutcome::Superseded | LoadOutcome::Busy => {
            return Err(AppError::service_unavailable("Drive load did not complete"));
        }
    };
    if forest.is_empty() {
        output::print_warning("Nothing loaded; keeping the previous snapshot");
        return Ok(());
    }

    snapshot::save_forest(&ctx.snapshot, &forest).await?;

    let mut explorer = ctx.explorer().await?;
    let stale = if args.prune {
        explorer.prune_selection().await
    } else {
        0
    };
    let store = explorer.store();

    match ctx.format {
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "snapshot": ctx.snapshot.display().to_string(),
            "roots": store.forest().len(),
            "folders": store.folder_count(),
            "files": store.file_count(),
            "pruned": stale,
        })),
        OutputFormat::Table => {
            output::print_success(&format!("Saved {}", ctx.snapshot.display()));
            output::print_kv("Roots", &store.forest().len().to_string());
            output::print_kv("Folders", &store.folder_count().to_string());
            output::print_kv("Files", &store.file_count().to_string());
            if args.prune {
                output::print_kv("Pruned", &stale.to_string());
            }
        }
    }
    Ok(())
}

/// Provider folder ids of the selection, first occurrence kept. The same
/// provider id can be selected under two drives.
fn reindex_folder_ids(store: &DriveTreeStore) -> Vec<String> {
    let scope = store.reindex_scope();
    let mut seen = HashSet::new();
    scope
        .iter()
        .filter_map(|id| native_folder_id(id.as_str()))
        .filter(|native| seen.insert(*native))
        .map(str::to_string)
        .collect()
}

/// `drivehub reindex`
pub async fn reindex(ctx: &Context, args: &ReindexArgs) -> AppResult<()> {
    let explorer = ctx.explorer().await?;
    let folder_ids = reindex_folder_ids(explorer.store());

    if folder_ids.is_empty() {
        output::print_warning("No folders selected; nothing to reindex");
        return Ok(());
    }

    if !args.yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!("Reindex {} selected folders?", folder_ids.len()))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !confirm {
            output::print_warning("Cancelled");
            return Ok(());
        }
    }

    let sink = HttpReindexSink::new(ApiClient::from_rag(&ctx.config.rag)?, &ctx.config.rag)?;
    let report = sink.reindex(&folder_ids).await?;

    match ctx.format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            output::print_success(&format!("Reindex {}", report.status));
            output::print_kv("Folders", &report.folders.len().to_string());
            if let Some(reason) = &report.reason {
                output::print_kv("Reason", reason);
            }
        }
    }
    Ok(())
}
