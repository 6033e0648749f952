//! Multi-sheet workbook export.
//!
//! The whole workbook is assembled in memory, staged to a temporary sibling
//! file and renamed into place, so a failed export never leaves a partial
//! file at the destination.

use std::{fs, path::Path, str::FromStr};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::errors::{ExpenseError, Result};
use crate::report::{NamedTable, ReportCell};

const HEADER_MIN_WIDTH: f64 = 10.0;

/// Serializes `tables` into xlsx bytes, one worksheet per table in order.
pub fn workbook_bytes(tables: &[NamedTable]) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for table in tables {
        let worksheet = workbook.add_worksheet().set_name(&table.name)?;
        write_table(worksheet, table, &header_format)?;
    }

    workbook.save_to_buffer()
}

/// Writes `tables` to `path` atomically.
pub fn write_workbook(tables: &[NamedTable], path: &Path) -> Result<()> {
    let bytes = workbook_bytes(tables)
        .map_err(|err| ExpenseError::spreadsheet(path, format!("failed to build workbook: {err}")))?;

    let tmp = path.with_extension("xlsx.tmp");
    if let Err(err) = fs::write(&tmp, &bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(ExpenseError::io(&tmp, err));
    }
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(ExpenseError::io(path, err));
    }

    info!(
        path = %path.display(),
        sheets = tables.len(),
        bytes = bytes.len(),
        "workbook exported"
    );
    Ok(())
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &NamedTable,
    header_format: &Format,
) -> std::result::Result<(), XlsxError> {
    for (col, header) in table.headers.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, header, header_format)?;
        let width = (header.chars().count() as f64 + 2.0).max(HEADER_MIN_WIDTH);
        worksheet.set_column_width(col, width)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_num, col as u16, cell)?;
        }
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &ReportCell,
) -> std::result::Result<(), XlsxError> {
    match cell {
        // Blank cells are left unwritten.
        ReportCell::Text(text) if text.is_empty() => {}
        ReportCell::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
        // ISO text keeps the calendar date independent of sheet date systems.
        ReportCell::Date(date) => {
            worksheet.write_string(row, col, date.format("%Y-%m-%d").to_string())?;
        }
        ReportCell::Number(value) => match exact_f64(value) {
            Some(number) => {
                worksheet.write_number(row, col, number)?;
            }
            // Beyond f64 precision; decimal text reloads exactly.
            None => {
                worksheet.write_string(row, col, value.to_string())?;
            }
        },
        ReportCell::Count(count) => {
            worksheet.write_number(row, col, *count as f64)?;
        }
    }
    Ok(())
}

/// The `f64` for `value` when it reads back as the same decimal.
fn exact_f64(value: &Decimal) -> Option<f64> {
    value
        .to_f64()
        .filter(|number| Decimal::from_str(&number.to_string()).ok() == Some(*value))
}
