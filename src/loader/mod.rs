//! Record loader: reads a ledger sheet and converts its rows into typed
//! [`LedgerRecord`]s.
//!
//! The loader checks the schema once at the boundary, rejects the whole load
//! on the first unparseable row, and never logs; callers decide how to report
//! failures.

pub mod cells;
pub mod columns;
mod delimited;
mod workbook;

use std::path::Path;

use crate::errors::{ExpenseError, Result};
use crate::ledger::{LedgerRecord, RecordSet};

pub use cells::RawCell;
pub use columns::{ColumnMap, Field};

static MISSING_CELL: RawCell = RawCell::Empty;

/// A header row plus data rows, as read from any supported source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
    /// Sheet rows above the header row.
    pub header_offset: usize,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<RawCell>>) -> Self {
        Self {
            headers,
            rows,
            header_offset: 0,
        }
    }

    pub fn with_header_offset(mut self, offset: usize) -> Self {
        self.header_offset = offset;
        self
    }
}

/// Loads the ledger stored at `path`.
///
/// `.csv` files are read as comma-separated text; anything else is opened as
/// a workbook and its first worksheet is used.
pub fn load(path: &Path) -> Result<RecordSet> {
    std::fs::metadata(path).map_err(|err| ExpenseError::io(path, err))?;
    let table = if is_csv(path) {
        delimited::read_table(path)?
    } else {
        workbook::read_table(path)?
    };
    load_table(table)
}

/// Converts an in-memory table into records, keeping row order.
pub fn load_table(table: RawTable) -> Result<RecordSet> {
    let columns = ColumnMap::resolve(&table.headers)?;
    let mut records = Vec::with_capacity(table.rows.len());

    for (idx, row) in table.rows.iter().enumerate() {
        if row.iter().all(RawCell::is_blank) {
            continue;
        }
        // 1-based sheet row; the header sits at `header_offset + 1`.
        let row_number = table.header_offset + idx + 2;
        records.push(convert_row(row, row_number, &columns)?);
    }

    Ok(RecordSet::new(columns.extra_headers(), records))
}

fn convert_row(row: &[RawCell], row_number: usize, columns: &ColumnMap) -> Result<LedgerRecord> {
    let cell = |idx: usize| row.get(idx).unwrap_or(&MISSING_CELL);
    let parse_error = |field: Field, cell: &RawCell, reason: String| ExpenseError::Parse {
        row: row_number,
        column: field.name().to_string(),
        value: cell.display(),
        reason,
    };

    let date_cell = cell(columns.date);
    let date = cells::parse_date(date_cell)
        .map_err(|reason| parse_error(Field::Date, date_cell, reason))?;

    let amount_cell = cell(columns.amount);
    let amount = cells::parse_amount(amount_cell)
        .map_err(|reason| parse_error(Field::Amount, amount_cell, reason))?;

    let category_cell = cell(columns.category);
    let category = cells::parse_text(category_cell);
    if category.is_empty() {
        return Err(parse_error(
            Field::Category,
            category_cell,
            "category is required".into(),
        ));
    }

    let item = cells::parse_text(cell(columns.item));
    let extras = columns
        .extras
        .iter()
        .map(|(idx, _)| cells::parse_text(cell(*idx)))
        .collect();

    Ok(LedgerRecord::new(date, item, amount, category).with_extras(extras))
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
