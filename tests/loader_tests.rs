mod common;

use assert_fs::prelude::*;
use assert_fs::TempDir;
use rust_decimal::Decimal;

use expense_core::errors::ExpenseError;
use expense_core::loader;

use common::{date, write_xlsx, SheetRow};
use rust_xlsxwriter::Workbook;

#[test]
fn xlsx_with_localized_headers_loads_in_row_order() {
    let dir = TempDir::new().unwrap();
    let path = write_xlsx(
        dir.path(),
        "ledger.xlsx",
        ["日期", "項目", "金額", "類別"],
        &[
            SheetRow { serial: 45292.0, item: "午餐", amount: 150.0, category: "餐飲" },
            SheetRow { serial: 45293.0, item: "捷運", amount: 30.5, category: "交通" },
        ],
    );

    let set = loader::load(&path).unwrap();
    assert_eq!(set.len(), 2);

    let first = &set.records()[0];
    assert_eq!(first.date(), date(2024, 1, 1));
    assert_eq!(first.item(), "午餐");
    assert_eq!(first.amount(), Decimal::from(150));
    assert_eq!(first.category(), "餐飲");
    assert_eq!(first.year_month_key(), "2024-01");

    assert_eq!(set.records()[1].amount(), Decimal::new(305, 1));
}

#[test]
fn missing_columns_are_all_named() {
    let dir = TempDir::new().unwrap();
    let file = dir.child("ledger.csv");
    file.write_str("date,item,cost\n2024-01-01,lunch,150\n").unwrap();

    match loader::load(file.path()) {
        Err(ExpenseError::Schema { missing }) => assert_eq!(missing, ["amount", "category"]),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn unparseable_amount_reports_sheet_row() {
    let dir = TempDir::new().unwrap();
    let file = dir.child("ledger.csv");
    file.write_str(
        "date,item,amount,category\n\
         2024-01-01,lunch,150,food\n\
         2024-01-02,transit,thirty,transport\n",
    )
    .unwrap();

    match loader::load(file.path()) {
        Err(ExpenseError::Parse { row, column, value, .. }) => {
            assert_eq!(row, 3);
            assert_eq!(column, "amount");
            assert_eq!(value, "thirty");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn oversized_amounts_are_rejected_at_load() {
    let dir = TempDir::new().unwrap();
    let file = dir.child("ledger.csv");
    file.write_str(
        "date,item,amount,category\n\
         2024-01-01,bond,5e28,investment\n\
         2024-01-02,bond,5e28,investment\n",
    )
    .unwrap();

    match loader::load(file.path()) {
        Err(ExpenseError::Parse { row, column, reason, .. }) => {
            assert_eq!(row, 2);
            assert_eq!(column, "amount");
            assert_eq!(reason, "amount out of range");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn parse_errors_point_at_sheet_rows_below_a_title_block() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("offset.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["date", "item", "amount", "category"].iter().enumerate() {
        sheet.write_string(2, col as u16, *header).unwrap();
    }
    let rows = [["2024-01-01", "lunch", "150", "food"], ["2024-01-02", "transit", "thirty", "transport"]];
    for (idx, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            sheet.write_string(idx as u32 + 3, col as u16, *value).unwrap();
        }
    }
    workbook.save(&path).unwrap();

    match loader::load(&path) {
        Err(ExpenseError::Parse { row, column, .. }) => {
            assert_eq!(row, 5);
            assert_eq!(column, "amount");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn bad_date_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.child("ledger.csv");
    file.write_str("date,item,amount,category\nsoon,lunch,150,food\n")
        .unwrap();

    let err = loader::load(file.path()).unwrap_err();
    assert!(matches!(err, ExpenseError::Parse { row: 2, ref column, .. } if column == "date"));
}

#[test]
fn currency_text_and_passthrough_columns() {
    let dir = TempDir::new().unwrap();
    let file = dir.child("ledger.csv");
    file.write_str(
        "date,item,amount,category,note\n\
         2024-03-05,laptop,\"$1,234.50\",equipment,work\n\
         2024-03-06,refund,-20,equipment,\n",
    )
    .unwrap();

    let set = loader::load(file.path()).unwrap();
    assert_eq!(set.extra_columns(), ["note"]);
    assert_eq!(set.records()[0].amount(), Decimal::new(123450, 2));
    assert_eq!(set.records()[0].extras(), ["work"]);
    assert_eq!(set.records()[1].amount(), Decimal::from(-20));
}

#[test]
fn blank_rows_are_skipped() {
    let dir = TempDir::new().unwrap();
    let file = dir.child("ledger.csv");
    file.write_str("date,item,amount,category\n2024-01-01,lunch,150,food\n,,,\n")
        .unwrap();

    assert_eq!(loader::load(file.path()).unwrap().len(), 1);
}

#[test]
fn header_only_sheet_is_an_empty_set() {
    let dir = TempDir::new().unwrap();
    let file = dir.child("ledger.csv");
    file.write_str("date,item,amount,category\n").unwrap();

    let set = loader::load(file.path()).unwrap();
    assert!(set.is_empty());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nowhere.xlsx");

    match loader::load(&path) {
        Err(ExpenseError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected io error, got {other:?}"),
    }
}
