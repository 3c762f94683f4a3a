//! Folder selection commands.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use drivehub_core::result::AppResult;
use drivehub_service::DriveExplorer;

use super::{Context, require_folder};

/// How `toggle`/`select` treat the subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Cascade,
    Single,
}

/// Selected folder row
#[derive(Debug, Serialize, Tabled)]
struct SelectionRow {
    /// Folder ID
    id: String,
    /// Name
    name: String,
    /// Subtree state
    state: String,
    /// Sent on reindex
    reindex: bool,
}

fn selection_rows(explorer: &DriveExplorer) -> Vec<SelectionRow> {
    let store = explorer.store();
    let scope = store.reindex_scope();
    store
        .selection()
        .iter()
        .map(|id| SelectionRow {
            id: id.to_string(),
            name: store
                .find(id)
                .map_or_else(|| "(not loaded)".to_string(), |n| n.name.clone()),
            state: store.check_state(id).to_string(),
            reindex: scope.contains(id),
        })
        .collect()
}

fn report_state(explorer: &DriveExplorer, id: &str) {
    let state = explorer.check_state(id);
    output::print_success(&format!("{} {id} ({state})", state.marker()));
}

/// `drivehub check <id>`
pub async fn check(ctx: &Context, id: &str) -> AppResult<()> {
    let explorer = ctx.explorer().await?;
    require_folder(&explorer, id)?;
    let state = explorer.check_state(id);

    match ctx.format {
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "id": id,
            "state": state,
            "selected": explorer.store().is_selected(id),
        })),
        OutputFormat::Table => {
            output::print_kv("Folder", id);
            output::print_kv("State", &format!("{} {state}", state.marker()));
            output::print_kv(
                "Selected",
                &explorer.store().is_selected(id).to_string(),
            );
        }
    }
    Ok(())
}

/// `drivehub toggle <id>` and `drivehub select <id>`
pub async fn toggle(ctx: &Context, id: &str, mode: Mode) -> AppResult<()> {
    let mut explorer = ctx.explorer().await?;
    require_folder(&explorer, id)?;
    match mode {
        Mode::Cascade => explorer.toggle_cascade(id).await,
        Mode::Single => explorer.toggle_select(id).await,
    }
    report_state(&explorer, id);
    Ok(())
}

/// `drivehub select-all`
pub async fn select_all(ctx: &Context) -> AppResult<()> {
    let mut explorer = ctx.explorer().await?;
    explorer.select_all().await;
    output::print_success(&format!(
        "Selected {} folders",
        explorer.store().selection().len()
    ));
    Ok(())
}

/// `drivehub clear`
pub async fn clear(ctx: &Context) -> AppResult<()> {
    let mut explorer = ctx.explorer().await?;
    explorer.clear_selection().await;
    output::print_success("Selection cleared");
    Ok(())
}

/// `drivehub selection`
pub async fn list(ctx: &Context) -> AppResult<()> {
    let explorer = ctx.explorer().await?;
    let rows = selection_rows(&explorer);
    output::print_list(&rows, ctx.format);
    if ctx.format == OutputFormat::Table {
        output::print_kv(
            "Reindex scope",
            &format!("{} folders", explorer.store().reindex_scope().len()),
        );
    }
    Ok(())
}
