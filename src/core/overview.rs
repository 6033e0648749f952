use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::LedgerRecord;

/// Headline figures for a record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpendingOverview {
    pub total: Decimal,
    /// Average amount per record; absent for an empty set.
    pub mean: Option<Decimal>,
    pub record_count: usize,
    pub category_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

pub fn overview(records: &[LedgerRecord]) -> SpendingOverview {
    let total: Decimal = records.iter().map(LedgerRecord::amount).sum();
    let record_count = records.len();
    let mean = (record_count > 0).then(|| total / Decimal::from(record_count));
    let category_count = records
        .iter()
        .map(LedgerRecord::category)
        .collect::<HashSet<_>>()
        .len();

    SpendingOverview {
        total,
        mean,
        record_count,
        category_count,
        first_date: records.iter().map(LedgerRecord::date).min(),
        last_date: records.iter().map(LedgerRecord::date).max(),
    }
}
