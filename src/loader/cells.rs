use std::str::FromStr;

use chrono::{Days, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Cell value as read from a sheet, before schema conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    /// Spreadsheet date stored as a serial day number (1900 system).
    DateSerial(f64),
    Bool(bool),
}

impl RawCell {
    pub fn is_blank(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Text shown in error messages and used for passthrough columns.
    pub fn display(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(text) => text.clone(),
            RawCell::Number(value) | RawCell::DateSerial(value) => value.to_string(),
            RawCell::Bool(value) => String::from(if *value { "TRUE" } else { "FALSE" }),
        }
    }
}

const TEXT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
const TEXT_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];
/// Largest serial Excel accepts (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

pub fn parse_date(cell: &RawCell) -> Result<NaiveDate, String> {
    match cell {
        RawCell::Empty => Err("date is required".into()),
        RawCell::DateSerial(serial) | RawCell::Number(serial) => date_from_serial(*serial),
        RawCell::Text(text) => parse_date_text(text.trim()),
        RawCell::Bool(_) => Err("expected a date".into()),
    }
}

fn parse_date_text(text: &str) -> Result<NaiveDate, String> {
    if text.is_empty() {
        return Err("date is required".into());
    }
    for format in TEXT_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date);
        }
    }
    for format in TEXT_DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(datetime.date());
        }
    }
    Err("unrecognised date format (use YYYY-MM-DD)".into())
}

/// Day serials count from 1899-12-30 so that Excel's phantom 1900-02-29 lines
/// up for every date after February 1900.
fn date_from_serial(serial: f64) -> Result<NaiveDate, String> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_EXCEL_SERIAL {
        return Err("date serial out of range".into());
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).ok_or("invalid serial epoch")?;
    epoch
        .checked_add_days(Days::new(serial.floor() as u64))
        .ok_or_else(|| "date serial out of range".into())
}

/// Largest accepted magnitude, 10^18. Sums of up to ~79 billion such
/// amounts still fit a `Decimal`.
const MAX_AMOUNT: i64 = 1_000_000_000_000_000_000;

pub fn parse_amount(cell: &RawCell) -> Result<Decimal, String> {
    let amount = match cell {
        RawCell::Empty => return Err("amount is required".into()),
        RawCell::Number(value) => decimal_from_f64(*value)?,
        RawCell::Text(text) => parse_amount_text(text)?,
        RawCell::DateSerial(_) | RawCell::Bool(_) => return Err("expected a number".into()),
    };
    if amount.abs() > Decimal::from(MAX_AMOUNT) {
        return Err("amount out of range".into());
    }
    Ok(amount)
}

/// Goes through the shortest round-trip text form so `0.1` stays `0.1`
/// instead of picking up binary noise.
fn decimal_from_f64(value: f64) -> Result<Decimal, String> {
    if !value.is_finite() {
        return Err("amount must be a finite number".into());
    }
    parse_decimal(&value.to_string())
}

fn parse_amount_text(text: &str) -> Result<Decimal, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("amount is required".into());
    }
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let cleaned: String = body
        .strip_prefix('$')
        .unwrap_or(body)
        .chars()
        .filter(|ch| *ch != ',')
        .collect();
    let value = parse_decimal(cleaned.trim())?;
    Ok(if negative { -value } else { value })
}

fn parse_decimal(text: &str) -> Result<Decimal, String> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| "not a number".to_string())
}

pub fn parse_text(cell: &RawCell) -> String {
    match cell {
        RawCell::Text(text) => text.trim().to_string(),
        other => other.display(),
    }
}
