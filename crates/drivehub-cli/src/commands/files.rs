//! File listing and search.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::warn;

use crate::output::{self, OutputFormat};
use drivehub_client::{HttpFavoritesStore, HttpRecentFileStore, HttpUserDirectory};
use drivehub_core::result::AppResult;
use drivehub_core::traits::source::{FavoritesStore, RecentFileStore};
use drivehub_core::traits::state::StateStore;
use drivehub_entity::file::{FileCategory, FileRecord};
use drivehub_service::{
    FileQuery, RecencyList, UserNameResolver, favorite_files, overlay_favorites, recent_files,
    search_files,
};

use super::Context;

/// State key of the recent search queries.
const SEARCH_HISTORY_KEY: &str = "search:recent";

/// Arguments for `files`
#[derive(Debug, Args)]
pub struct FilesArgs {
    /// Only favorite files
    #[arg(long, conflicts_with = "recent")]
    pub favorites: bool,

    /// Only recently opened files
    #[arg(long)]
    pub recent: bool,

    /// Show user ids instead of display names
    #[arg(long)]
    pub raw_ids: bool,
}

/// Arguments for `search`
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text matched against name, type, and last updater
    pub text: Option<String>,

    /// File category (hwp, word, excel, powerpoint, txt, image, pdf)
    #[arg(short, long, value_parser = parse_category)]
    pub category: Option<FileCategory>,

    /// Exact last updater id
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Updated on or after this day (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Updated on or before this day (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Show recent queries instead of searching
    #[arg(long)]
    pub history: bool,

    /// Show user ids instead of display names
    #[arg(long)]
    pub raw_ids: bool,
}

fn parse_category(s: &str) -> Result<FileCategory, String> {
    FileCategory::parse(s).ok_or_else(|| format!("unknown category: {s}"))
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// Name
    name: String,
    /// Type
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    file_type: String,
    /// Size
    size: String,
    /// Last updated
    updated: String,
    /// Last updater
    updater: String,
    /// Favorite marker
    #[tabled(rename = "★")]
    favorite: String,
    /// File ID
    id: String,
}

fn file_rows(files: &[&FileRecord], names: &HashMap<String, String>) -> Vec<FileRow> {
    files
        .iter()
        .map(|f| {
            let updater = f.last_updater.as_ref().map_or_else(String::new, |u| {
                names
                    .get(u.as_str())
                    .cloned()
                    .unwrap_or_else(|| u.to_string())
            });
            FileRow {
                name: format!("{} {}", f.icon, f.name),
                file_type: f.file_type.clone(),
                size: f.size_label(),
                updated: f
                    .updated_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
                updater,
                favorite: if f.is_favorite { "★" } else { "" }.to_string(),
                id: f.id.to_string(),
            }
        })
        .collect()
}

async fn display_names(
    ctx: &Context,
    files: &[&FileRecord],
    raw_ids: bool,
) -> AppResult<HashMap<String, String>> {
    if raw_ids || files.is_empty() {
        return Ok(HashMap::new());
    }
    let directory = HttpUserDirectory::new(ctx.backend()?, &ctx.config.backend)?;
    let resolver = UserNameResolver::new(Arc::new(directory), &ctx.config.users);
    let ids = files
        .iter()
        .filter_map(|f| f.last_updater.as_ref().map(|u| u.as_str()));
    Ok(resolver.resolve_many(ids).await)
}

async fn print_files(
    ctx: &Context,
    files: &[&FileRecord],
    raw_ids: bool,
) -> AppResult<()> {
    match ctx.format {
        OutputFormat::Json => output::print_json(files),
        OutputFormat::Table => {
            let names = display_names(ctx, files, raw_ids).await?;
            output::print_list(&file_rows(files, &names), ctx.format);
        }
    }
    Ok(())
}

/// `drivehub files`
pub async fn list(ctx: &Context, args: &FilesArgs) -> AppResult<()> {
    let mut explorer = ctx.explorer().await?;

    if args.favorites {
        let store = HttpFavoritesStore::new(ctx.backend()?, &ctx.config.backend)?;
        match store.favorite_file_ids().await {
            Ok(ids) => {
                overlay_favorites(explorer.store_mut(), &ids);
            }
            Err(e) => {
                warn!(error = %e, "Favorites unavailable");
                output::print_warning("Favorites unavailable; showing those from the snapshot");
            }
        }
        let files = favorite_files(explorer.store());
        return print_files(ctx, &files, args.raw_ids).await;
    }

    if args.recent {
        let store = HttpRecentFileStore::new(ctx.backend()?, &ctx.config.backend)?;
        let ids = store.recent_file_ids().await?;
        let files = recent_files(explorer.store(), &ids, ctx.config.recent.file_capacity);
        return print_files(ctx, &files, args.raw_ids).await;
    }

    let files = explorer.store().files();
    print_files(ctx, &files, args.raw_ids).await
}

async fn load_history(ctx: &Context) -> RecencyList<String> {
    let capacity = ctx.config.recent.query_capacity;
    let saved = match ctx.state.load(SEARCH_HISTORY_KEY).await {
        Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_default(),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read search history");
            Vec::new()
        }
    };
    RecencyList::with_entries(capacity, saved)
}

async fn save_history(ctx: &Context, history: &RecencyList<String>) {
    let entries: Vec<&String> = history.iter().collect();
    let result = match serde_json::to_string(&entries) {
        Ok(json) => ctx.state.save(SEARCH_HISTORY_KEY, &json).await,
        Err(e) => Err(e.into()),
    };
    if let Err(e) = result {
        warn!(error = %e, "Failed to save search history");
    }
}

/// `drivehub search`
pub async fn search(ctx: &Context, args: &SearchArgs) -> AppResult<()> {
    let mut history = load_history(ctx).await;

    if args.history {
        let queries: Vec<&String> = history.iter().collect();
        match ctx.format {
            OutputFormat::Json => output::print_json(&queries),
            OutputFormat::Table => {
                for (i, query) in queries.iter().enumerate() {
                    println!("{:>2}. {query}", i + 1);
                }
            }
        }
        return Ok(());
    }

    let text = args.text.clone().unwrap_or_default();
    if !text.trim().is_empty() {
        history.touch(text.trim().to_string());
        save_history(ctx, &history).await;
    }

    let query = FileQuery {
        text,
        category: args.category,
        owner: args.owner.clone(),
        updated_from: args.from,
        updated_to: args.to,
    };
    let explorer = ctx.explorer().await?;
    let files = search_files(explorer.store(), &query);
    print_files(ctx, &files, args.raw_ids).await
}
