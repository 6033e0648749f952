//! Ledger domain values: records, month keys, record sets and filters.

pub mod filter;
pub mod record;
pub mod record_set;

pub use filter::FilterSpec;
pub use record::{LedgerRecord, ParseYearMonthError, YearMonth};
pub use record_set::RecordSet;
