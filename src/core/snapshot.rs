use super::aggregation::{
    leading_category, summarize_by_category, summarize_by_month, top_n, CategorySummary,
    MonthlyTotal,
};
use super::overview::{overview, SpendingOverview};
use super::pivot::{pivot_month_category, MonthlyCategoryMatrix};
use crate::errors::Result;
use crate::ledger::{FilterSpec, LedgerRecord, RecordSet};

/// Every derived view of one filtered record set, computed together so all
/// consumers of a single interaction read the same numbers.
#[derive(Debug, Clone)]
pub struct Snapshot {
    filter: FilterSpec,
    source_len: usize,
    records: RecordSet,
    categories: Vec<CategorySummary>,
    months: Vec<MonthlyTotal>,
    pivot: MonthlyCategoryMatrix,
    top: Vec<LedgerRecord>,
    overview: SpendingOverview,
}

impl Snapshot {
    pub fn build(source: &RecordSet, filter: &FilterSpec, top: usize) -> Self {
        let records = source.filtered(filter);
        let rows = records.records();
        Self {
            filter: filter.clone(),
            source_len: source.len(),
            categories: summarize_by_category(rows),
            months: summarize_by_month(rows),
            pivot: pivot_month_category(rows),
            top: top_n(rows, top),
            overview: overview(rows),
            records,
        }
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Size of the unfiltered record set the snapshot was built from.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn categories(&self) -> &[CategorySummary] {
        &self.categories
    }

    pub fn months(&self) -> &[MonthlyTotal] {
        &self.months
    }

    pub fn pivot(&self) -> &MonthlyCategoryMatrix {
        &self.pivot
    }

    pub fn top(&self) -> &[LedgerRecord] {
        &self.top
    }

    pub fn overview(&self) -> &SpendingOverview {
        &self.overview
    }

    pub fn leading(&self) -> Result<CategorySummary> {
        leading_category(&self.categories)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExpenseError;
    use crate::ledger::YearMonth;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn source() -> RecordSet {
        let rows = [
            ((2024, 1, 1), "lunch", 150, "food"),
            ((2024, 1, 2), "transit", 30, "transport"),
            ((2024, 2, 1), "movie", 280, "entertainment"),
            ((2024, 2, 3), "dinner", 90, "food"),
        ];
        RecordSet::from_records(
            rows.iter()
                .map(|((y, m, d), item, amount, category)| {
                    LedgerRecord::new(
                        NaiveDate::from_ymd_opt(*y, *m, *d).unwrap(),
                        *item,
                        Decimal::from(*amount),
                        *category,
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn views_share_one_filtered_set() {
        let feb = YearMonth::new(2024, 2).unwrap();
        let filter = FilterSpec::default().with_months([feb]);
        let snapshot = Snapshot::build(&source(), &filter, 1);

        assert_eq!(snapshot.source_len(), 4);
        assert_eq!(snapshot.records().len(), 2);
        assert_eq!(snapshot.overview().total, Decimal::from(370));
        assert_eq!(snapshot.months().len(), 1);
        assert_eq!(snapshot.pivot().months(), [feb]);
        assert_eq!(snapshot.top().len(), 1);
        assert_eq!(snapshot.top()[0].item(), "movie");
        assert_eq!(snapshot.leading().unwrap().category, "entertainment");
    }

    #[test]
    fn empty_selection_reports_no_data() {
        let filter = FilterSpec::default().with_categories(["travel"]);
        let snapshot = Snapshot::build(&source(), &filter, 10);
        assert!(snapshot.is_empty());
        assert!(matches!(snapshot.leading(), Err(ExpenseError::NoData)));
    }
}
