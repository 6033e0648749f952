use rust_decimal::Decimal;

use crate::core::{CategorySummary, MonthlyCategoryMatrix, MonthlyTotal};

/// Labels with one value each; feeds pie and bar charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.values.iter().copied().sum()
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// One named layer per category over a shared set of x labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackedSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub layers: Vec<(String, Vec<Decimal>)>,
}

impl StackedSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.layers.is_empty()
    }

    /// Sum of every layer at label `idx`.
    pub fn stack_total(&self, idx: usize) -> Decimal {
        self.layers
            .iter()
            .filter_map(|(_, values)| values.get(idx).copied())
            .sum()
    }
}

pub fn category_share(summaries: &[CategorySummary]) -> ChartSeries {
    ChartSeries {
        title: "Spending by category".into(),
        labels: summaries.iter().map(|s| s.category.clone()).collect(),
        values: summaries.iter().map(|s| s.total).collect(),
    }
}

pub fn monthly_trend(months: &[MonthlyTotal]) -> ChartSeries {
    ChartSeries {
        title: "Monthly spending".into(),
        labels: months.iter().map(|m| m.month.key()).collect(),
        values: months.iter().map(|m| m.total).collect(),
    }
}

pub fn monthly_stacked(matrix: &MonthlyCategoryMatrix) -> StackedSeries {
    let layers = matrix
        .categories()
        .iter()
        .enumerate()
        .filter_map(|(idx, category)| matrix.column(idx).map(|values| (category.clone(), values)))
        .collect();
    StackedSeries {
        title: "Monthly spending by category".into(),
        labels: matrix.months().iter().map(|m| m.key()).collect(),
        layers,
    }
}
