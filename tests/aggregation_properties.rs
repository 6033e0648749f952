use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use expense_core::core::{
    apply_filter, pivot_month_category, summarize_by_category, summarize_by_month, top_n,
};
use expense_core::ledger::{FilterSpec, LedgerRecord, YearMonth};

const CATEGORIES: &[&str] = &["food", "transport", "rent", "fun", "health"];

fn arb_record() -> impl Strategy<Value = LedgerRecord> {
    (
        2023i32..=2024,
        1u32..=12,
        1u32..=28,
        -50_000i64..200_000,
        0usize..CATEGORIES.len(),
    )
        .prop_map(|(year, month, day, cents, category)| {
            LedgerRecord::new(
                NaiveDate::from_ymd_opt(year, month, day).unwrap(),
                format!("item-{cents}"),
                Decimal::new(cents, 2),
                CATEGORIES[category],
            )
        })
}

fn arb_records() -> impl Strategy<Value = Vec<LedgerRecord>> {
    prop::collection::vec(arb_record(), 0..60)
}

proptest! {
    #[test]
    fn category_totals_conserve_the_grand_total(records in arb_records()) {
        let grand: Decimal = records.iter().map(LedgerRecord::amount).sum();
        let summed: Decimal = summarize_by_category(&records).iter().map(|s| s.total).sum();
        prop_assert_eq!(grand, summed);

        let counted: usize = summarize_by_category(&records).iter().map(|s| s.count).sum();
        prop_assert_eq!(counted, records.len());
    }

    #[test]
    fn summaries_are_ordered_by_total_then_label(records in arb_records()) {
        let summaries = summarize_by_category(&records);
        for pair in summaries.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.total > b.total || (a.total == b.total && a.category < b.category),
                "{} ({}) before {} ({})", a.category, a.total, b.category, b.total
            );
        }
        prop_assert!(summaries.iter().all(|s| s.count > 0));
    }

    #[test]
    fn empty_filter_is_identity(records in arb_records()) {
        prop_assert_eq!(apply_filter(&records, &FilterSpec::default()), records);
    }

    #[test]
    fn filter_keeps_exactly_the_matching_records(
        records in arb_records(),
        picked in prop::collection::btree_set(0usize..CATEGORIES.len(), 0..3),
        month in 1u32..=12,
    ) {
        let filter = FilterSpec::new(
            picked.iter().map(|idx| CATEGORIES[*idx]),
            [YearMonth::new(2024, month).unwrap()],
        );
        let kept = apply_filter(&records, &filter);
        let expected: Vec<LedgerRecord> = records
            .iter()
            .filter(|r| (picked.is_empty() || picked.iter().any(|idx| CATEGORIES[*idx] == r.category()))
                && r.year() == 2024
                && r.month() == month)
            .cloned()
            .collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn pivot_rows_and_columns_match_summaries(records in arb_records()) {
        let pivot = pivot_month_category(&records);
        prop_assert_eq!(pivot.row_totals(), summarize_by_month(&records));

        let columns: Vec<(String, Decimal)> = summarize_by_category(&records)
            .into_iter()
            .map(|s| (s.category, s.total))
            .collect();
        prop_assert_eq!(pivot.column_totals(), columns);
    }

    #[test]
    fn top_n_is_a_stable_descending_prefix(records in arb_records(), n in 0usize..80) {
        let top = top_n(&records, n);
        prop_assert_eq!(top.len(), n.min(records.len()));

        let mut sorted = records.clone();
        sorted.sort_by(|a, b| b.amount().cmp(&a.amount()));
        sorted.truncate(n);
        prop_assert_eq!(top, sorted);
    }
}
