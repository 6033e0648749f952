//! Batch jobs behind the `analyze` and `visualize` subcommands.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::charts::{self, ChartStyle, PIE_CHART_FILE, STACKED_CHART_FILE, TREND_CHART_FILE};
use crate::core::{
    leading_category, overview, pivot_month_category, summarize_by_category, summarize_by_month,
    CategorySummary,
};
use crate::errors::{ExpenseError, Result};
use crate::export;
use crate::ledger::{LedgerRecord, RecordSet};
use crate::loader;
use crate::report::{self, category_share, monthly_stacked, monthly_trend};

pub const ANALYSIS_FILE: &str = "expense_analysis_result.xlsx";
pub const CHARTS_DIR: &str = "charts";

#[derive(Debug, Clone)]
pub struct AnalyzeOutcome {
    pub output_path: PathBuf,
    pub record_count: usize,
    pub categories: Vec<CategorySummary>,
    pub leading: CategorySummary,
}

#[derive(Debug, Clone)]
pub struct VisualizeOutcome {
    pub output_dir: PathBuf,
    pub charts: Vec<PathBuf>,
    pub record_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Loads `input`, summarizes it by category and writes the three-sheet
/// analysis workbook. `output_dir` defaults to the input's directory.
pub fn analyze(input: &Path, output_dir: Option<&Path>) -> Result<AnalyzeOutcome> {
    let records = load_non_empty(input)?;
    let categories = summarize_by_category(records.records());
    let leading = leading_category(&categories)?;

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => parent_dir(input),
    };
    ensure_dir(&dir)?;
    let output_path = dir.join(ANALYSIS_FILE);

    let report = report::format(&records, &categories, &leading);
    export::write_workbook(&report.tables, &output_path)?;

    info!(
        input = %input.display(),
        output = %output_path.display(),
        categories = categories.len(),
        leading = %leading.category,
        "analysis complete"
    );

    Ok(AnalyzeOutcome {
        output_path,
        record_count: records.len(),
        categories,
        leading,
    })
}

/// Loads `input` and renders the three standard charts. `output_dir`
/// defaults to `<input dir>/charts`.
pub fn visualize(
    input: &Path,
    output_dir: Option<&Path>,
    style: &ChartStyle,
) -> Result<VisualizeOutcome> {
    let records = load_non_empty(input)?;
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => parent_dir(input).join(CHARTS_DIR),
    };
    let charts = write_charts(records.records(), &dir, style)?;
    let summary = overview(records.records());

    info!(
        input = %input.display(),
        output = %dir.display(),
        charts = charts.len(),
        "visualization complete"
    );

    Ok(VisualizeOutcome {
        output_dir: dir,
        charts,
        record_count: summary.record_count,
        first_date: summary.first_date,
        last_date: summary.last_date,
    })
}

/// Renders the category share, monthly trend and stacked charts for
/// `records` into `dir`, creating it when missing.
pub fn write_charts(records: &[LedgerRecord], dir: &Path, style: &ChartStyle) -> Result<Vec<PathBuf>> {
    if records.is_empty() {
        warn!(dir = %dir.display(), "no records to chart");
        return Err(ExpenseError::NoData);
    }
    ensure_dir(dir)?;

    let rendered = [
        (
            PIE_CHART_FILE,
            charts::render_pie(&category_share(&summarize_by_category(records)), style),
        ),
        (
            TREND_CHART_FILE,
            charts::render_bar(&monthly_trend(&summarize_by_month(records)), style),
        ),
        (
            STACKED_CHART_FILE,
            charts::render_stacked(&monthly_stacked(&pivot_month_category(records)), style),
        ),
    ];

    let documents: Vec<(PathBuf, String)> = rendered
        .into_iter()
        .map(|(name, svg)| (dir.join(name), svg))
        .collect();
    charts::write_charts(&documents)?;
    Ok(documents.into_iter().map(|(path, _)| path).collect())
}

fn load_non_empty(input: &Path) -> Result<RecordSet> {
    let records = loader::load(input)?;
    info!(input = %input.display(), records = records.len(), "ledger loaded");
    if records.is_empty() {
        warn!(input = %input.display(), "ledger has no records");
        return Err(ExpenseError::NoData);
    }
    Ok(records)
}

fn parent_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|err| ExpenseError::io(dir, err))
}
