//! Aggregation engine: filtering, category/month summaries, pivots and
//! rankings over immutable ledger records.

pub mod aggregation;
pub mod overview;
pub mod pivot;
pub mod snapshot;

pub use aggregation::{
    apply_filter, category_options, leading_category, month_options, newest_first,
    summarize_by_category, summarize_by_month, top_n, CategorySummary, MonthlyTotal,
};
pub use overview::{overview, SpendingOverview};
pub use pivot::{pivot_month_category, MonthlyCategoryMatrix};
pub use snapshot::Snapshot;
