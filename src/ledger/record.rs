use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Calendar month key. Orders chronologically and renders as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Sortable text form, e.g. `2024-01`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month `{0}` (use YYYY-MM)")]
pub struct ParseYearMonthError(String);

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let invalid = || ParseYearMonthError(trimmed.to_string());
        let (year, month) = trimmed
            .split_once(['-', '/'])
            .ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

/// One ledger entry. Calendar attributes are derived on construction and the
/// value is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRecord {
    date: NaiveDate,
    item: String,
    amount: Decimal,
    category: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    extras: Vec<String>,
    year_month: YearMonth,
}

impl LedgerRecord {
    pub fn new(
        date: NaiveDate,
        item: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            item: item.into(),
            amount,
            category: category.into(),
            extras: Vec::new(),
            year_month: YearMonth::from_date(date),
        }
    }

    /// Attaches passthrough column values, aligned with the owning record
    /// set's extra column names.
    pub fn with_extras(mut self, extras: Vec<String>) -> Self {
        self.extras = extras;
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    pub fn year(&self) -> i32 {
        self.year_month.year()
    }

    pub fn month(&self) -> u32 {
        self.year_month.month()
    }

    pub fn year_month(&self) -> YearMonth {
        self.year_month
    }

    pub fn year_month_key(&self) -> String {
        self.year_month.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_calendar_fields_from_date() {
        let record = LedgerRecord::new(
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            "lunch",
            Decimal::new(15050, 2),
            "food",
        );
        assert_eq!(record.year(), 2024);
        assert_eq!(record.month(), 3);
        assert_eq!(record.year_month_key(), "2024-03");
    }

    #[test]
    fn year_month_orders_chronologically() {
        let dec = YearMonth::new(2023, 12).unwrap();
        let jan = YearMonth::new(2024, 1).unwrap();
        let feb = YearMonth::new(2024, 2).unwrap();
        let mut months = vec![feb, dec, jan];
        months.sort();
        assert_eq!(months, vec![dec, jan, feb]);
    }

    #[test]
    fn parses_month_keys() {
        assert_eq!(
            "2024-07".parse::<YearMonth>().unwrap(),
            YearMonth::new(2024, 7).unwrap()
        );
        assert_eq!(
            " 2024/11 ".parse::<YearMonth>().unwrap(),
            YearMonth::new(2024, 11).unwrap()
        );
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("July".parse::<YearMonth>().is_err());
    }
}
