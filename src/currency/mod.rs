//! Display formatting for monetary amounts. Amounts are shown in whatever
//! unit the ledger uses; there is no conversion between currencies.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

/// Symbol and separators used when rendering amounts for people.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MoneyFormat {
    pub symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub negative_style: NegativeStyle,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            negative_style: NegativeStyle::Sign,
        }
    }
}

/// Rounds half away from zero, the way spreadsheets display values.
pub fn round_for_display(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders `value` with grouping, e.g. `1234.5` at precision 2 → `1,234.50`.
pub fn format_number(format: &MoneyFormat, value: Decimal, precision: u32) -> String {
    let rounded = round_for_display(value, precision).abs();
    let body = format!("{:.*}", precision as usize, rounded);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let mut rendered = group_digits(int_part, format.grouping_separator);
    if let Some(frac) = frac_part {
        rendered.push(format.decimal_separator);
        rendered.push_str(frac);
    }
    if value.is_sign_negative() && !rounded.is_zero() {
        rendered = format!("-{rendered}");
    }
    rendered
}

/// Renders `value` with the configured symbol, e.g. `$1,234`.
pub fn format_money(format: &MoneyFormat, value: Decimal, precision: u32) -> String {
    let number = format_number(format, value.abs(), precision);
    let negative = value.is_sign_negative() && !round_for_display(value, precision).is_zero();
    match (negative, format.negative_style) {
        (false, _) => format!("{}{}", format.symbol, number),
        (true, NegativeStyle::Sign) => format!("-{}{}", format.symbol, number),
        (true, NegativeStyle::Parentheses) => format!("({}{})", format.symbol, number),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        let format = MoneyFormat::default();
        assert_eq!(format_number(&format, Decimal::new(12345, 1), 2), "1,234.50");
        assert_eq!(format_number(&format, Decimal::from(999), 0), "999");
        assert_eq!(format_number(&format, Decimal::from(1_000_000), 0), "1,000,000");
    }

    #[test]
    fn rounds_half_away_from_zero_for_display() {
        let format = MoneyFormat::default();
        assert_eq!(format_money(&format, Decimal::new(2805, 1), 0), "$281");
        assert_eq!(format_money(&format, Decimal::new(1005, 3), 2), "$1.01");
    }

    #[test]
    fn honours_separators_and_negative_style() {
        let format = MoneyFormat {
            symbol: "€".into(),
            decimal_separator: ',',
            grouping_separator: ' ',
            negative_style: NegativeStyle::Parentheses,
        };
        assert_eq!(format_money(&format, Decimal::new(-12345, 1), 2), "(€1 234,50)");

        let signed = MoneyFormat::default();
        assert_eq!(format_money(&signed, Decimal::new(-5, 0), 0), "-$5");
        assert_eq!(format_money(&signed, Decimal::new(-1, 3), 2), "$0.00");
    }
}
