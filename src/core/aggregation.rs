//! Grouping, summarising and ranking over ledger records.
//!
//! Every function is pure: it reads the input slice and returns freshly
//! allocated results. Sums are exact decimals and nothing here rounds.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::{ExpenseError, Result};
use crate::ledger::{FilterSpec, LedgerRecord, YearMonth};

/// Totals for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
    pub mean: Decimal,
}

impl CategorySummary {
    fn from_parts(category: &str, total: Decimal, count: usize) -> Self {
        Self {
            category: category.to_string(),
            total,
            count,
            mean: total / Decimal::from(count),
        }
    }
}

/// Total spend for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: Decimal,
}

/// Keeps the records accepted by `filter`, preserving order.
pub fn apply_filter(records: &[LedgerRecord], filter: &FilterSpec) -> Vec<LedgerRecord> {
    if filter.is_pass_through() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}

/// Per-category total, count and mean, ordered by total descending and then
/// by category label ascending.
pub fn summarize_by_category(records: &[LedgerRecord]) -> Vec<CategorySummary> {
    let mut totals: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for record in records {
        let entry = totals
            .entry(record.category())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += record.amount();
        entry.1 += 1;
    }

    let mut summaries: Vec<CategorySummary> = totals
        .into_iter()
        .map(|(category, (total, count))| CategorySummary::from_parts(category, total, count))
        .collect();
    summaries.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    summaries
}

/// Monthly totals in chronological order.
pub fn summarize_by_month(records: &[LedgerRecord]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    for record in records {
        *totals.entry(record.year_month()).or_insert(Decimal::ZERO) += record.amount();
    }
    totals
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect()
}

/// The `n` largest records by amount. Equal amounts keep their input order.
pub fn top_n(records: &[LedgerRecord], n: usize) -> Vec<LedgerRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.amount().cmp(&a.amount()));
    ranked.truncate(n);
    ranked
}

/// First entry of an already ranked summary sequence.
pub fn leading_category(summaries: &[CategorySummary]) -> Result<CategorySummary> {
    summaries.first().cloned().ok_or(ExpenseError::NoData)
}

/// Distinct categories in first-seen order.
pub fn category_options(records: &[LedgerRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| seen.insert(record.category()))
        .map(|record| record.category().to_string())
        .collect()
}

/// Distinct months in chronological order.
pub fn month_options(records: &[LedgerRecord]) -> Vec<YearMonth> {
    records
        .iter()
        .map(LedgerRecord::year_month)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Records ordered by date, most recent first. Same-day records keep their
/// input order.
pub fn newest_first(records: &[LedgerRecord]) -> Vec<LedgerRecord> {
    let mut ordered = records.to_vec();
    ordered.sort_by(|a, b| b.date().cmp(&a.date()));
    ordered
}
