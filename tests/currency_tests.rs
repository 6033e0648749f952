use rust_decimal::Decimal;

use expense_core::currency::{format_money, format_number, round_for_display, MoneyFormat, NegativeStyle};

#[test]
fn formats_money_with_locale_separators() {
    let format = MoneyFormat {
        symbol: "€".into(),
        decimal_separator: ',',
        grouping_separator: ' ',
        negative_style: NegativeStyle::Parentheses,
    };
    assert_eq!(format_money(&format, Decimal::new(-12345, 1), 2), "(€1 234,50)");
    assert_eq!(format_money(&format, Decimal::new(1_234_567, 0), 0), "€1 234 567");
}

#[test]
fn default_format_uses_sign_and_commas() {
    let format = MoneyFormat::default();
    assert_eq!(format_money(&format, Decimal::from(-280), 0), "-$280");
    assert_eq!(format_number(&format, Decimal::new(123450, 2), 2), "1,234.50");
}

#[test]
fn display_rounding_is_half_away_from_zero() {
    assert_eq!(round_for_display(Decimal::new(25, 1), 0), Decimal::from(3));
    assert_eq!(round_for_display(Decimal::new(-25, 1), 0), Decimal::from(-3));
    assert_eq!(round_for_display(Decimal::new(1005, 3), 2), Decimal::new(101, 2));
}

#[test]
fn values_rounding_to_zero_lose_their_sign() {
    let format = MoneyFormat::default();
    assert_eq!(format_money(&format, Decimal::new(-4, 3), 2), "$0.00");
}
