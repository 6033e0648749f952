#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use expense_core::ledger::{LedgerRecord, RecordSet};
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook};

/// The three-row ledger used across the scenario tests.
pub const SCENARIO_CSV: &str = "date,item,amount,category\n\
    2024-01-01,lunch,150,food\n\
    2024-01-02,transit,30,transport\n\
    2024-02-01,movie,280,entertainment\n";

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn record(day: NaiveDate, item: &str, amount: i64, category: &str) -> LedgerRecord {
    LedgerRecord::new(day, item, Decimal::from(amount), category)
}

pub fn scenario_records() -> RecordSet {
    RecordSet::from_records(vec![
        record(date(2024, 1, 1), "lunch", 150, "food"),
        record(date(2024, 1, 2), "transit", 30, "transport"),
        record(date(2024, 2, 1), "movie", 280, "entertainment"),
    ])
}

pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write csv fixture");
    path
}

/// One row of an xlsx fixture: date serial, item, amount, category.
pub struct SheetRow<'a> {
    pub serial: f64,
    pub item: &'a str,
    pub amount: f64,
    pub category: &'a str,
}

/// Writes an xlsx ledger with date-formatted serial cells and the given
/// header labels.
pub fn write_xlsx(dir: &Path, name: &str, headers: [&str; 4], rows: &[SheetRow<'_>]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).expect("header");
    }
    for (idx, row) in rows.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet
            .write_number_with_format(r, 0, row.serial, &date_format)
            .expect("date");
        sheet.write_string(r, 1, row.item).expect("item");
        sheet.write_number(r, 2, row.amount).expect("amount");
        sheet.write_string(r, 3, row.category).expect("category");
    }
    workbook.save(&path).expect("save xlsx fixture");
    path
}
