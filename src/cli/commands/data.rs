use std::path::{Path, PathBuf};

use chrono::Local;

use crate::charts::ChartStyle;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::export;
use crate::jobs;
use crate::report::filtered_records_table;

const DEFAULT_CHART_DIR: &str = "charts";

pub(crate) fn definitions() -> Vec<super::CommandDefinition> {
    use super::CommandDefinition as Def;
    vec![
        Def::new("open", "Load a ledger spreadsheet", "open <file>", cmd_open),
        Def::new(
            "export",
            "Save the filtered records as an xlsx workbook",
            "export [file.xlsx]",
            cmd_export,
        ),
        Def::new(
            "charts",
            "Render charts for the filtered records",
            "charts [dir]",
            cmd_charts,
        ),
    ]
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: open <file>".into()))?;
    context.open(Path::new(path))
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filtered = context.records()?.filtered(&context.filter);
    if filtered.is_empty() {
        output::warning("No records match the current filter; nothing exported.");
        return Ok(());
    }

    let path = match args.first() {
        Some(path) => PathBuf::from(path),
        None => default_export_name(),
    };
    export::write_workbook(&[filtered_records_table(&filtered)], &path)?;
    output::success(format!(
        "Exported {} records to {}.",
        filtered.len(),
        path.display()
    ));
    Ok(())
}

fn cmd_charts(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filtered = context.records()?.filtered(&context.filter);
    let dir = PathBuf::from(args.first().copied().unwrap_or(DEFAULT_CHART_DIR));
    let style = ChartStyle::from_config(context.config);
    let written = jobs::write_charts(filtered.records(), &dir, &style)?;
    output::success(format!("Rendered {} charts into {}.", written.len(), dir.display()));
    for path in written {
        output::info(format!("  {}", path.display()));
    }
    Ok(())
}

fn default_export_name() -> PathBuf {
    PathBuf::from(format!(
        "filtered_expenses_{}.xlsx",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}
