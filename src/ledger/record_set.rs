use super::{filter::FilterSpec, record::LedgerRecord};
use crate::core::aggregation;

/// Canonical record sequence produced by the loader, in source row order,
/// together with the names of the passthrough columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    extra_columns: Vec<String>,
    records: Vec<LedgerRecord>,
}

impl RecordSet {
    pub fn new(extra_columns: Vec<String>, records: Vec<LedgerRecord>) -> Self {
        Self {
            extra_columns,
            records,
        }
    }

    pub fn from_records(records: Vec<LedgerRecord>) -> Self {
        Self::new(Vec::new(), records)
    }

    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns a new set holding the records accepted by `filter`.
    pub fn filtered(&self, filter: &FilterSpec) -> RecordSet {
        RecordSet {
            extra_columns: self.extra_columns.clone(),
            records: aggregation::apply_filter(&self.records, filter),
        }
    }

    pub fn into_records(self) -> Vec<LedgerRecord> {
        self.records
    }
}
