//! Report formatter: turns aggregation results into named tables for
//! spreadsheet export and into chart-ready series.
//!
//! This is the presentation boundary, so summary figures are rounded to two
//! decimal places here. Raw record amounts are passed through exactly.

pub mod series;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::CategorySummary;
use crate::currency::round_for_display;
use crate::ledger::{LedgerRecord, RecordSet};

pub use series::{category_share, monthly_stacked, monthly_trend, ChartSeries, StackedSeries};

pub const RECORDS_SHEET: &str = "Records";
pub const SUMMARY_SHEET: &str = "Category Summary";
pub const LEADING_SHEET: &str = "Top Category";
pub const FILTERED_SHEET: &str = "Filtered Records";

const SUMMARY_PRECISION: u32 = 2;

/// Typed cell value of an exported table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportCell {
    Text(String),
    Date(NaiveDate),
    Number(Decimal),
    Count(usize),
}

impl ReportCell {
    /// Plain text form, used by terminal views.
    pub fn to_text(&self) -> String {
        match self {
            ReportCell::Text(text) => text.clone(),
            ReportCell::Date(date) => date.format("%Y-%m-%d").to_string(),
            ReportCell::Number(value) => value.normalize().to_string(),
            ReportCell::Count(count) => count.to_string(),
        }
    }
}

/// One logical sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<ReportCell>>,
}

impl NamedTable {
    pub fn new(name: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            name: name.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Ordered set of tables making up one export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub tables: Vec<NamedTable>,
}

impl Report {
    pub fn table(&self, name: &str) -> Option<&NamedTable> {
        self.tables.iter().find(|table| table.name == name)
    }
}

/// Builds the three analysis sheets: raw records, the category summary and
/// the leading-category highlight.
pub fn format(
    records: &RecordSet,
    summaries: &[CategorySummary],
    leading: &CategorySummary,
) -> Report {
    let mut summary = NamedTable::new(SUMMARY_SHEET, &["category", "total", "count", "mean"]);
    summary.rows = summaries.iter().map(summary_row).collect();

    let mut highlight = NamedTable::new(LEADING_SHEET, &["category", "total", "count", "mean"]);
    highlight.rows.push(summary_row(leading));

    Report {
        tables: vec![
            records_table(RECORDS_SHEET, records, false),
            summary,
            highlight,
        ],
    }
}

/// Sheet offered as the dashboard download: the filtered records plus their
/// derived calendar columns.
pub fn filtered_records_table(records: &RecordSet) -> NamedTable {
    records_table(FILTERED_SHEET, records, true)
}

fn records_table(name: &str, records: &RecordSet, with_calendar: bool) -> NamedTable {
    let mut headers = vec!["date", "item", "amount", "category"];
    headers.extend(records.extra_columns().iter().map(String::as_str));
    if with_calendar {
        headers.extend(["year", "month", "year_month"]);
    }

    let mut table = NamedTable::new(name, &headers);
    table.rows = records
        .records()
        .iter()
        .map(|record| record_row(record, with_calendar))
        .collect();
    table
}

fn record_row(record: &LedgerRecord, with_calendar: bool) -> Vec<ReportCell> {
    let mut row = vec![
        ReportCell::Date(record.date()),
        ReportCell::Text(record.item().to_string()),
        ReportCell::Number(record.amount()),
        ReportCell::Text(record.category().to_string()),
    ];
    row.extend(
        record
            .extras()
            .iter()
            .map(|value| ReportCell::Text(value.clone())),
    );
    if with_calendar {
        row.push(ReportCell::Count(record.year() as usize));
        row.push(ReportCell::Count(record.month() as usize));
        row.push(ReportCell::Text(record.year_month_key()));
    }
    row
}

fn summary_row(summary: &CategorySummary) -> Vec<ReportCell> {
    vec![
        ReportCell::Text(summary.category.clone()),
        ReportCell::Number(round_for_display(summary.total, SUMMARY_PRECISION)),
        ReportCell::Count(summary.count),
        ReportCell::Number(round_for_display(summary.mean, SUMMARY_PRECISION)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{leading_category, summarize_by_category};

    fn records() -> RecordSet {
        let rows = [
            ((2024, 1, 1), "lunch", 150, "food", "team"),
            ((2024, 1, 2), "transit", 30, "transport", ""),
            ((2024, 2, 1), "movie", 280, "entertainment", ""),
            ((2024, 2, 9), "snack", 10, "food", ""),
        ];
        RecordSet::new(
            vec!["note".into()],
            rows.iter()
                .map(|((y, m, d), item, amount, category, note)| {
                    LedgerRecord::new(
                        NaiveDate::from_ymd_opt(*y, *m, *d).unwrap(),
                        *item,
                        Decimal::from(*amount),
                        *category,
                    )
                    .with_extras(vec![note.to_string()])
                })
                .collect(),
        )
    }

    #[test]
    fn builds_three_named_sheets() {
        let set = records();
        let summaries = summarize_by_category(set.records());
        let leading = leading_category(&summaries).unwrap();
        let report = format(&set, &summaries, &leading);

        let names: Vec<&str> = report.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec![RECORDS_SHEET, SUMMARY_SHEET, LEADING_SHEET]);

        let raw = report.table(RECORDS_SHEET).unwrap();
        assert_eq!(raw.headers, vec!["date", "item", "amount", "category", "note"]);
        assert_eq!(raw.rows.len(), 4);
        assert_eq!(raw.rows[0][4], ReportCell::Text("team".into()));

        let summary = report.table(SUMMARY_SHEET).unwrap();
        assert_eq!(summary.rows.len(), 3);
        assert_eq!(summary.rows[0][0], ReportCell::Text("entertainment".into()));
        assert_eq!(summary.rows[1][2], ReportCell::Count(2));
        assert_eq!(summary.rows[1][3], ReportCell::Number(Decimal::from(80)));

        let highlight = report.table(LEADING_SHEET).unwrap();
        assert_eq!(highlight.rows.len(), 1);
        assert_eq!(highlight.rows[0][1], ReportCell::Number(Decimal::from(280)));
    }

    #[test]
    fn summary_figures_round_to_cents() {
        let set = RecordSet::from_records(
            [10, 10, 11]
                .iter()
                .map(|amount| {
                    LedgerRecord::new(
                        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                        "x",
                        Decimal::from(*amount),
                        "food",
                    )
                })
                .collect(),
        );
        let summaries = summarize_by_category(set.records());
        let report = format(&set, &summaries, &summaries[0]);
        let mean = &report.table(SUMMARY_SHEET).unwrap().rows[0][3];
        assert_eq!(mean, &ReportCell::Number(Decimal::new(1033, 2)));
        assert_eq!(mean.to_text(), "10.33");
    }

    #[test]
    fn filtered_sheet_carries_calendar_columns() {
        let table = filtered_records_table(&records());
        assert_eq!(table.name, FILTERED_SHEET);
        assert_eq!(
            &table.headers[5..],
            ["year".to_string(), "month".to_string(), "year_month".to_string()]
        );
        assert_eq!(table.rows[2][7], ReportCell::Text("2024-02".into()));
        assert_eq!(table.rows[2][6], ReportCell::Count(2));
    }
}
