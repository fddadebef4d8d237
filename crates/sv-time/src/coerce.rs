//! Date coercion.
//!
//! Callers hand dates in as timestamps, ISO text, `DD/MM/YYYY` text, Excel
//! 1900-system serial numbers, or chrono values.  [`coerce_to_date`] folds
//! them all into a [`Timestamp`]; anything it cannot read is an
//! [`Error::InvalidArgument`].

use chrono::{NaiveDate, NaiveDateTime};
use sv_core::errors::{Error, Result};
use sv_core::{Millis, Value};

use crate::timestamp::Timestamp;

/// Millisecond offset of Excel serial 0 (1899-12-30) from the Unix epoch.
const EXCEL_EPOCH_MILLIS: Millis = -25_569 * Timestamp::MILLIS_PER_DAY;

/// Date-time layouts accepted for text input, tried in order.
const DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Date-only layouts accepted for text input, tried in order.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Any value that can be read as a date.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Already a timestamp.
    Timestamp(Timestamp),
    /// Text in one of the accepted layouts.
    Text(String),
    /// An Excel 1900-system serial number; the fraction is the time of day.
    ExcelSerial(f64),
    /// A calendar date, taken at midnight UTC.
    Date(NaiveDate),
    /// A calendar date and time, taken as UTC.
    DateTime(NaiveDateTime),
}

impl From<Timestamp> for DateInput {
    fn from(ts: Timestamp) -> Self {
        DateInput::Timestamp(ts)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Text(s)
    }
}

impl From<f64> for DateInput {
    fn from(serial: f64) -> Self {
        DateInput::ExcelSerial(serial)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(d: NaiveDate) -> Self {
        DateInput::Date(d)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(dt: NaiveDateTime) -> Self {
        DateInput::DateTime(dt)
    }
}

/// Coerce `input` into a [`Timestamp`].
///
/// # Errors
/// Returns [`Error::InvalidArgument`] for unreadable text and for serial
/// numbers that are negative or not finite.
///
/// # Example
/// ```
/// use sv_time::{coerce_to_date, Timestamp};
///
/// let iso = coerce_to_date("2024-01-02").unwrap();
/// let serial = coerce_to_date(45293.0).unwrap();
/// assert_eq!(iso, serial);
/// assert_eq!(iso, Timestamp::from_ymd(2024, 1, 2).unwrap());
/// ```
pub fn coerce_to_date(input: impl Into<DateInput>) -> Result<Timestamp> {
    match input.into() {
        DateInput::Timestamp(ts) => Ok(ts),
        DateInput::Text(s) => parse_text(&s),
        DateInput::ExcelSerial(serial) => from_excel_serial(serial),
        DateInput::Date(d) => Ok(Timestamp::from(d)),
        DateInput::DateTime(dt) => Ok(Timestamp::from(dt)),
    }
}

/// Coerce a stored [`Value`] into a [`Timestamp`].
///
/// Timestamps pass through, numbers are read as Excel serials, text is
/// parsed; other variants are rejected.
pub fn coerce_value_to_date(value: &Value) -> Result<Timestamp> {
    match value {
        Value::Timestamp(ms) => Ok(Timestamp::from_millis(*ms)),
        Value::Number(n) => from_excel_serial(*n),
        Value::Text(s) => parse_text(s),
        other => Err(Error::InvalidArgument(format!(
            "cannot read a {} as a date",
            other.type_name()
        ))),
    }
}

/// Excel serial number of `ts` (days since 1899-12-30, fractional).
pub fn to_excel_serial(ts: Timestamp) -> f64 {
    (ts.millis() - EXCEL_EPOCH_MILLIS) as f64 / Timestamp::MILLIS_PER_DAY as f64
}

fn from_excel_serial(serial: f64) -> Result<Timestamp> {
    if !serial.is_finite() || serial < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "invalid Excel serial date {serial}"
        )));
    }
    let offset = (serial * Timestamp::MILLIS_PER_DAY as f64).round() as Millis;
    Ok(Timestamp::from_millis(EXCEL_EPOCH_MILLIS + offset))
}

fn parse_text(s: &str) -> Result<Timestamp> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::InvalidArgument("empty date string".into()));
    }
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Timestamp::from(dt));
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(Timestamp::from(d));
        }
    }
    Err(Error::InvalidArgument(format!("unreadable date '{s}'")))
}
