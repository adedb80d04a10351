// nbmerge: text-mode notebook merge view.
// Loads a three-way merge model, composes the merge view, optionally
// replays scripted interactions, then paints the view and prints the
// merged notebook.

mod settings;
mod text_renderer;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use nbmerge_core::ItemCoord;
use nbmerge_input::MoveOutcome;
use nbmerge_model::NotebookMergeModel;
use nbmerge_view::{CellSlot, NotebookMergeView};

use text_renderer::{PlainContentRenderer, TextGridRenderer};

/// Within-pane reorder of a cell's merged outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OutputMove {
    cell: usize,
    from: usize,
    to: usize,
}

/// Copy of an output from a read-only pane into the merged pane.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OutputInsert {
    cell: usize,
    pane: usize,
    item: usize,
    to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CellReorder {
    from: usize,
    to: usize,
}

/// Notebook three-way merge view.
#[derive(Parser, Debug)]
#[command(name = "nbmerge")]
#[command(about = "Show and script a notebook three-way merge")]
struct Args {
    /// Merge model JSON produced by the upstream diff/merge
    model: PathBuf,

    /// Settings file (defaults to the platform config dir)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the effective settings to the platform config dir
    #[arg(long)]
    save_settings: bool,

    /// Reorder a cell: FROM index into gap TO
    #[arg(long = "reorder-cell", value_name = "FROM:TO", value_parser = parse_cell_reorder)]
    reorder_cell: Vec<CellReorder>,

    /// Toggle a cell's delete flag
    #[arg(long = "toggle-delete", value_name = "CELL")]
    toggle_delete: Vec<usize>,

    /// Copy output ITEM of PANE into gap TO of the merged outputs
    #[arg(long = "insert", value_name = "CELL:PANE:ITEM:TO", value_parser = parse_output_insert)]
    insert: Vec<OutputInsert>,

    /// Move merged output FROM into gap TO
    #[arg(long = "move", value_name = "CELL:FROM:TO", value_parser = parse_output_move)]
    moves: Vec<OutputMove>,

    /// Skip painting; print only the merged notebook
    #[arg(long)]
    result_only: bool,
}

fn parse_indices<const N: usize>(s: &str) -> Result<[usize; N], String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != N {
        return Err(format!("expected {N} colon-separated indices, got {s:?}"));
    }
    let mut out = [0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| format!("{part:?} is not an index"))?;
    }
    Ok(out)
}

fn parse_cell_reorder(s: &str) -> Result<CellReorder, String> {
    let [from, to] = parse_indices(s)?;
    Ok(CellReorder { from, to })
}

fn parse_output_insert(s: &str) -> Result<OutputInsert, String> {
    let [cell, pane, item, to] = parse_indices(s)?;
    Ok(OutputInsert {
        cell,
        pane,
        item,
        to,
    })
}

fn parse_output_move(s: &str) -> Result<OutputMove, String> {
    let [cell, from, to] = parse_indices(s)?;
    Ok(OutputMove { cell, from, to })
}

fn merge_pane_of(view: &NotebookMergeView, cell: usize) -> Result<usize> {
    view.cell(cell)
        .and_then(CellSlot::view)
        .and_then(|v| v.outputs())
        .map(|row| row.view.panes().merge_pane_index())
        .with_context(|| format!("cell {cell} has no outputs view"))
}

fn report(what: &str, outcome: MoveOutcome) {
    match outcome {
        MoveOutcome::Rejected(reason) => log::warn!("{what}: rejected ({reason:?})"),
        applied => log::info!("{what}: {applied:?}"),
    }
}

/// Replay scripted interactions: cell reorders, delete toggles, output
/// inserts, then output moves.
fn apply_script(view: &mut NotebookMergeView, args: &Args) -> Result<()> {
    for r in &args.reorder_cell {
        let outcome = view.reorder_cell(r.from, r.to)?;
        report(&format!("reorder cell {}:{}", r.from, r.to), outcome);
    }
    for &cell in &args.toggle_delete {
        if view.toggle_delete(cell).is_none() {
            bail!("cell {cell} cannot be toggled");
        }
    }
    for i in &args.insert {
        let merge = merge_pane_of(view, i.cell)?;
        let outcome = view.move_output(
            i.cell,
            ItemCoord::new(i.pane, i.item),
            ItemCoord::new(merge, i.to),
        )?;
        report(&format!("insert into cell {}", i.cell), outcome);
    }
    for m in &args.moves {
        let merge = merge_pane_of(view, m.cell)?;
        let outcome = view.move_output(
            m.cell,
            ItemCoord::new(merge, m.from),
            ItemCoord::new(merge, m.to),
        )?;
        report(&format!("move in cell {}", m.cell), outcome);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => settings::load_settings_from(path),
        None => settings::load_settings(),
    };
    if args.save_settings {
        settings::save_settings(&settings);
    }

    let json = std::fs::read_to_string(&args.model)
        .with_context(|| format!("reading {}", args.model.display()))?;
    let model = NotebookMergeModel::from_json(&json)?;

    let content = PlainContentRenderer;
    let mut view = NotebookMergeView::compose(model, &content, settings.view_options());
    apply_script(&mut view, &args)?;

    if !args.result_only {
        let mut grid = TextGridRenderer::new();
        view.paint(&mut grid, &content);
        print!("{}", grid.contents());
        println!();
    }
    println!("{}", serde_json::to_string_pretty(&view.merged_result())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MergeViewSettings;

    #[test]
    fn index_lists_parse_with_exact_arity() {
        assert_eq!(
            parse_output_move("1:0:2"),
            Ok(OutputMove {
                cell: 1,
                from: 0,
                to: 2
            })
        );
        assert!(parse_output_move("1:0").is_err());
        assert!(parse_cell_reorder("a:1").is_err());
        assert_eq!(
            parse_output_insert("0:1:0:3").map(|i| (i.pane, i.to)),
            Ok((1, 3))
        );
    }

    #[test]
    fn scripted_flags_are_collected_per_kind() {
        let args = Args::try_parse_from([
            "nbmerge",
            "model.json",
            "--reorder-cell",
            "2:0",
            "--toggle-delete",
            "1",
            "--move",
            "0:1:0",
            "--move",
            "0:0:2",
        ])
        .unwrap();
        assert_eq!(args.reorder_cell, vec![CellReorder { from: 2, to: 0 }]);
        assert_eq!(args.toggle_delete, vec![1]);
        assert_eq!(args.moves.len(), 2);
        assert!(args.insert.is_empty());
    }

    #[test]
    fn demo_model_composes_and_scripts_apply() {
        let json = include_str!("../../../demos/merge.json");
        let model = NotebookMergeModel::from_json(json).unwrap();
        let settings = MergeViewSettings::default();
        let mut view =
            NotebookMergeView::compose(model, &PlainContentRenderer, settings.view_options());
        let args = Args::try_parse_from([
            "nbmerge",
            "merge.json",
            "--insert",
            "1:1:0:1",
            "--toggle-delete",
            "0",
        ])
        .unwrap();
        apply_script(&mut view, &args).unwrap();

        let result = view.merged_result();
        assert_eq!(result.cells.len(), 2);
        assert_eq!(result.cells[0].outputs.len(), 2);

        let mut grid = TextGridRenderer::new();
        view.paint(&mut grid, &PlainContentRenderer);
        let text = grid.contents();
        assert!(text.contains("[x]"));
        assert!(text.contains("Outputs changed"));
        assert!(text.contains("Notebook metadata changed (1 conflicted)"));
    }
}
