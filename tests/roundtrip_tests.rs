mod common;

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use expense_core::export;
use expense_core::ledger::{LedgerRecord, RecordSet};
use expense_core::loader;
use expense_core::report::filtered_records_table;

fn ledger() -> RecordSet {
    let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
    RecordSet::new(
        vec!["note".to_string(), "payer".to_string()],
        vec![
            LedgerRecord::new(day(1), "groceries", Decimal::new(8990, 2), "food")
                .with_extras(vec!["weekly".into(), "alex".into()]),
            LedgerRecord::new(day(2), "refund", Decimal::new(-1250, 2), "food")
                .with_extras(vec![String::new(), "sam".into()]),
            LedgerRecord::new(day(3), "bus pass", Decimal::from(30), "transport")
                .with_extras(vec!["monthly".into(), String::new()]),
        ],
    )
}

#[test]
fn exported_records_reload_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filtered.xlsx");
    let original = ledger();

    export::write_workbook(&[filtered_records_table(&original)], &path).unwrap();
    let reloaded = loader::load(&path).unwrap();

    assert_eq!(reloaded.extra_columns(), original.extra_columns());
    assert_eq!(reloaded.records(), original.records());
}

#[test]
fn analysis_workbook_reloads_its_records_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_csv(dir.path(), "ledger.csv", common::SCENARIO_CSV);

    let outcome = expense_core::jobs::analyze(&input, None).unwrap();
    let reloaded = loader::load(&outcome.output_path).unwrap();

    assert_eq!(reloaded.records(), common::scenario_records().records());
}

#[test]
fn amounts_beyond_float_precision_reload_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_csv(
        dir.path(),
        "ledger.csv",
        "date,item,amount,category\n\
         2024-05-01,bond,12345678901234567.89,investment\n\
         2024-05-02,fee,0.123456789012345678,bank\n\
         2024-05-03,lunch,150.25,food\n",
    );
    let original = loader::load(&input).unwrap();
    assert_eq!(
        original.records()[0].amount(),
        Decimal::from_str("12345678901234567.89").unwrap()
    );

    let path = dir.path().join("filtered.xlsx");
    export::write_workbook(&[filtered_records_table(&original)], &path).unwrap();
    let reloaded = loader::load(&path).unwrap();

    assert_eq!(reloaded.records(), original.records());
}
