mod common;

use expense_core::core::{
    apply_filter, leading_category, pivot_month_category, summarize_by_category,
    summarize_by_month, top_n, Snapshot,
};
use expense_core::errors::ExpenseError;
use expense_core::ledger::{FilterSpec, YearMonth};
use expense_core::loader;
use rust_decimal::Decimal;

use common::{date, record, scenario_records, write_csv, SCENARIO_CSV};

fn month(key: &str) -> YearMonth {
    key.parse().expect("month key")
}

#[test]
fn scenario_category_and_month_totals() {
    let set = scenario_records();
    let summaries = summarize_by_category(set.records());

    let totals: Vec<(&str, Decimal, usize)> = summaries
        .iter()
        .map(|s| (s.category.as_str(), s.total, s.count))
        .collect();
    assert_eq!(
        totals,
        vec![
            ("entertainment", Decimal::from(280), 1),
            ("food", Decimal::from(150), 1),
            ("transport", Decimal::from(30), 1),
        ]
    );
    assert_eq!(leading_category(&summaries).unwrap().category, "entertainment");

    let months: Vec<(String, Decimal)> = summarize_by_month(set.records())
        .iter()
        .map(|m| (m.month.key(), m.total))
        .collect();
    assert_eq!(
        months,
        vec![
            ("2024-01".to_string(), Decimal::from(180)),
            ("2024-02".to_string(), Decimal::from(280)),
        ]
    );
}

#[test]
fn scenario_loaded_from_csv_matches_in_memory_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "ledger.csv", SCENARIO_CSV);
    let loaded = loader::load(&path).unwrap();
    assert_eq!(loaded, scenario_records());
}

#[test]
fn filtering_on_one_dimension_leaves_the_other_open() {
    let set = scenario_records();
    let by_category = FilterSpec::default().with_categories(["food", "transport"]);
    let filtered = apply_filter(set.records(), &by_category);
    assert_eq!(filtered.len(), 2);

    let by_month = FilterSpec::default().with_months([month("2024-02")]);
    let filtered = apply_filter(set.records(), &by_month);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].item(), "movie");

    let both = FilterSpec::new(["food"], [month("2024-02")]);
    assert!(apply_filter(set.records(), &both).is_empty());
}

#[test]
fn filter_with_no_match_yields_empty_views_and_no_leader() {
    let filter = FilterSpec::default().with_categories(["travel"]);
    let snapshot = Snapshot::build(&scenario_records(), &filter, 10);
    assert!(snapshot.is_empty());
    assert!(snapshot.categories().is_empty());
    assert!(snapshot.months().is_empty());
    assert!(snapshot.pivot().is_empty());
    assert!(matches!(snapshot.leading(), Err(ExpenseError::NoData)));
    assert_eq!(snapshot.overview().mean, None);
}

#[test]
fn ties_break_alphabetically_and_top_n_is_stable() {
    let set = vec![
        record(date(2024, 3, 1), "b-first", 50, "zeta"),
        record(date(2024, 3, 2), "a-second", 50, "alpha"),
        record(date(2024, 3, 3), "small", 5, "alpha"),
    ];
    let summaries = summarize_by_category(&set);
    assert_eq!(summaries[0].category, "alpha");
    assert_eq!(summaries[0].total, Decimal::from(55));

    let top = top_n(&set, 2);
    assert_eq!(top[0].item(), "b-first");
    assert_eq!(top[1].item(), "a-second");
    assert_eq!(top_n(&set, 0).len(), 0);
}

#[test]
fn refunds_reduce_totals_without_rejection() {
    let set = vec![
        record(date(2024, 4, 1), "jacket", 120, "clothes"),
        record(date(2024, 4, 9), "refund", -120, "clothes"),
        record(date(2024, 4, 9), "free sample", 0, "food"),
    ];
    let summaries = summarize_by_category(&set);
    let clothes = summaries.iter().find(|s| s.category == "clothes").unwrap();
    assert_eq!(clothes.total, Decimal::ZERO);
    assert_eq!(clothes.count, 2);
    assert_eq!(clothes.mean, Decimal::ZERO);
}

#[test]
fn pivot_is_zero_filled() {
    let pivot = pivot_month_category(scenario_records().records());
    assert_eq!(pivot.months().len(), 2);
    assert_eq!(pivot.categories(), ["entertainment", "food", "transport"]);
    assert_eq!(pivot.value(month("2024-01"), "entertainment"), Decimal::ZERO);
    assert_eq!(pivot.value(month("2024-02"), "entertainment"), Decimal::from(280));
    assert_eq!(pivot.value(month("2024-01"), "transport"), Decimal::from(30));
}
