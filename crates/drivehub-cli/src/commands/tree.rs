//! Tree rendering and expansion.

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use drivehub_core::result::AppResult;
use drivehub_entity::folder::{CheckState, FolderNode};
use drivehub_service::DriveTreeStore;

use super::{Context, require_folder};

/// Arguments for `tree`
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Show collapsed folders' children too
    #[arg(short, long)]
    pub all: bool,

    /// Show folder ids next to names
    #[arg(long)]
    pub ids: bool,
}

/// One visible folder.
#[derive(Debug, Serialize)]
struct TreeLine {
    id: String,
    name: String,
    depth: usize,
    state: CheckState,
    expanded: bool,
    files: usize,
}

/// Visible folders in display order. Check states come from one
/// post-order count, so collapsed subtrees are walked but not emitted.
fn visible_lines(store: &DriveTreeStore, all: bool) -> Vec<TreeLine> {
    /// Returns `(selected, total)` folder counts of the subtree.
    fn walk(
        store: &DriveTreeStore,
        node: &FolderNode,
        depth: usize,
        emit: bool,
        all: bool,
        out: &mut Vec<TreeLine>,
    ) -> (usize, usize) {
        let slot = emit.then(|| {
            out.push(TreeLine {
                id: node.id.to_string(),
                name: node.name.clone(),
                depth,
                state: CheckState::Unchecked,
                expanded: node.is_expanded,
                files: node.files.len(),
            });
            out.len() - 1
        });

        let mut selected = usize::from(store.is_selected(&node.id));
        let mut total = 1;
        let emit_children = emit && (all || node.is_expanded);
        for child in &node.sub_folders {
            let (s, t) = walk(store, child, depth + 1, emit_children, all, out);
            selected += s;
            total += t;
        }

        if let Some(index) = slot {
            out[index].state = CheckState::from_counts(selected, total);
        }
        (selected, total)
    }

    let mut out = Vec::new();
    for root in store.forest() {
        walk(store, root, 0, true, all, &mut out);
    }
    out
}

fn format_line(line: &TreeLine, with_ids: bool) -> String {
    let arrow = if line.expanded { "▾" } else { "▸" };
    let mut text = format!(
        "{}{} {} {}",
        "  ".repeat(line.depth),
        arrow,
        line.state.marker(),
        line.name
    );
    if line.files > 0 {
        text.push_str(&format!(" ({} files)", line.files));
    }
    if with_ids {
        text.push_str(&format!("  [{}]", line.id));
    }
    text
}

/// `drivehub tree`
pub async fn render(ctx: &Context, args: &TreeArgs) -> AppResult<()> {
    let explorer = ctx.explorer().await?;
    let lines = visible_lines(explorer.store(), args.all);

    match ctx.format {
        OutputFormat::Json => output::print_json(&lines),
        OutputFormat::Table => {
            for line in &lines {
                println!("{}", format_line(line, args.ids));
            }
        }
    }
    Ok(())
}

/// `drivehub expand <id>`
pub async fn expand(ctx: &Context, id: &str) -> AppResult<()> {
    let mut explorer = ctx.explorer().await?;
    require_folder(&explorer, id)?;
    explorer.toggle_expand(id).await;

    let expanded = explorer.store().find(id).is_some_and(|n| n.is_expanded);
    output::print_success(&format!(
        "{id} {}",
        if expanded { "expanded" } else { "collapsed" }
    ));
    Ok(())
}
