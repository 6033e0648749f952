use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::{RawCell, RawTable};
use crate::errors::{ExpenseError, Result};

/// Reads the first worksheet of an xlsx/xls/xlsb/ods file.
pub(super) fn read_table(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|err| ExpenseError::spreadsheet(path, format!("failed to open workbook: {err}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ExpenseError::spreadsheet(path, "workbook contains no sheets"))?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|err| {
        ExpenseError::spreadsheet(path, format!("failed to read sheet '{sheet_name}': {err}"))
    })?;

    // The range starts at the first used cell, not at A1.
    let header_offset = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(header_text).collect(),
        None => Vec::new(),
    };
    let rows = rows.map(|row| row.iter().map(convert_cell).collect()).collect();

    Ok(RawTable::new(headers, rows).with_header_offset(header_offset))
}

fn header_text(cell: &Data) -> String {
    match convert_cell(cell) {
        RawCell::Text(text) => text.trim().to_string(),
        other => other.display(),
    }
}

fn convert_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Float(n) => RawCell::Number(*n),
        Data::Int(n) => RawCell::Number(*n as f64),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) => RawCell::DateSerial(dt.as_f64()),
        Data::DateTimeIso(s) => RawCell::Text(s.clone()),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(e) => RawCell::Text(format!("#{e:?}")),
    }
}
