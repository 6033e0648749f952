use std::{collections::BTreeSet, fmt};

use super::record::{LedgerRecord, YearMonth};

/// Category × month selection.
///
/// Each dimension is independent: an empty set places no restriction on that
/// dimension, so `FilterSpec::default()` keeps every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    categories: BTreeSet<String>,
    months: BTreeSet<YearMonth>,
}

impl FilterSpec {
    pub fn new<C, S, M>(categories: C, months: M) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        M: IntoIterator<Item = YearMonth>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            months: months.into_iter().collect(),
        }
    }

    pub fn with_categories<C, S>(mut self, categories: C) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_categories(categories);
        self
    }

    pub fn with_months<M>(mut self, months: M) -> Self
    where
        M: IntoIterator<Item = YearMonth>,
    {
        self.set_months(months);
        self
    }

    pub fn set_categories<C, S>(&mut self, categories: C)
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
    }

    pub fn set_months<M>(&mut self, months: M)
    where
        M: IntoIterator<Item = YearMonth>,
    {
        self.months = months.into_iter().collect();
    }

    pub fn clear_categories(&mut self) {
        self.categories.clear();
    }

    pub fn clear_months(&mut self) {
        self.months.clear();
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn months(&self) -> &BTreeSet<YearMonth> {
        &self.months
    }

    pub fn is_pass_through(&self) -> bool {
        self.categories.is_empty() && self.months.is_empty()
    }

    pub fn matches(&self, record: &LedgerRecord) -> bool {
        let category_ok =
            self.categories.is_empty() || self.categories.contains(record.category());
        let month_ok = self.months.is_empty() || self.months.contains(&record.year_month());
        category_ok && month_ok
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let categories = if self.categories.is_empty() {
            "all".to_string()
        } else {
            self.categories
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };
        let months = if self.months.is_empty() {
            "all".to_string()
        } else {
            self.months
                .iter()
                .map(YearMonth::key)
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(f, "categories: {categories}; months: {months}")
    }
}
