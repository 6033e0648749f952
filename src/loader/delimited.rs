use std::path::Path;

use csv::ReaderBuilder;

use super::{RawCell, RawTable};
use crate::errors::{ExpenseError, Result};

/// Reads a comma-separated file with a header row. Every cell is text; typed
/// conversion happens during row conversion.
pub(super) fn read_table(path: &Path) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|err| csv_error(path, err))?;

    let headers = reader
        .headers()
        .map_err(|err| csv_error(path, err))?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| csv_error(path, err))?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        RawCell::Empty
                    } else {
                        RawCell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawTable::new(headers, rows))
}

fn csv_error(path: &Path, err: csv::Error) -> ExpenseError {
    if err.is_io_error() {
        if let csv::ErrorKind::Io(io) = err.into_kind() {
            return ExpenseError::io(path, io);
        }
        return ExpenseError::spreadsheet(path, "unreadable csv file");
    }
    ExpenseError::spreadsheet(path, format!("invalid csv: {err}"))
}
