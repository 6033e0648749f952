use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregation::{month_options, summarize_by_category, MonthlyTotal};
use crate::ledger::{LedgerRecord, YearMonth};

/// Month × category grid of summed amounts.
///
/// Rows are chronological; columns follow category summary order (total
/// descending, label ascending). Every (month, category) pair has a value,
/// zero when no record falls in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCategoryMatrix {
    months: Vec<YearMonth>,
    categories: Vec<String>,
    cells: Vec<Vec<Decimal>>,
}

impl MonthlyCategoryMatrix {
    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Amounts of one month, aligned with [`categories`](Self::categories).
    pub fn row(&self, month_idx: usize) -> Option<&[Decimal]> {
        self.cells.get(month_idx).map(Vec::as_slice)
    }

    /// Amounts of one category, aligned with [`months`](Self::months).
    pub fn column(&self, category_idx: usize) -> Option<Vec<Decimal>> {
        if category_idx >= self.categories.len() {
            return None;
        }
        Some(self.cells.iter().map(|row| row[category_idx]).collect())
    }

    pub fn value(&self, month: YearMonth, category: &str) -> Decimal {
        let row = self.months.iter().position(|m| *m == month);
        let col = self.categories.iter().position(|c| c == category);
        match (row, col) {
            (Some(row), Some(col)) => self.cells[row][col],
            _ => Decimal::ZERO,
        }
    }

    pub fn row_totals(&self) -> Vec<MonthlyTotal> {
        self.months
            .iter()
            .zip(&self.cells)
            .map(|(month, row)| MonthlyTotal {
                month: *month,
                total: row.iter().copied().sum(),
            })
            .collect()
    }

    pub fn column_totals(&self) -> Vec<(String, Decimal)> {
        self.categories
            .iter()
            .enumerate()
            .map(|(idx, category)| {
                let total: Decimal = self.cells.iter().map(|row| row[idx]).sum();
                (category.clone(), total)
            })
            .collect()
    }
}

pub fn pivot_month_category(records: &[LedgerRecord]) -> MonthlyCategoryMatrix {
    let months = month_options(records);
    let categories: Vec<String> = summarize_by_category(records)
        .into_iter()
        .map(|summary| summary.category)
        .collect();

    let month_index: HashMap<YearMonth, usize> = months
        .iter()
        .enumerate()
        .map(|(idx, month)| (*month, idx))
        .collect();
    let category_index: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(idx, category)| (category.as_str(), idx))
        .collect();

    let mut cells = vec![vec![Decimal::ZERO; categories.len()]; months.len()];
    for record in records {
        let row = month_index[&record.year_month()];
        let col = category_index[record.category()];
        cells[row][col] += record.amount();
    }

    MonthlyCategoryMatrix {
        months,
        categories,
        cells,
    }
}
