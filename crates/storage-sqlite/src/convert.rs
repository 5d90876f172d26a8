//! Tolerant parsing helpers for TEXT-stored decimals and timestamps.
//!
//! Amounts and dates are stored as TEXT to keep exact decimal values out of
//! SQLite's float affinity. Reads never fail on a malformed stored value;
//! they log and fall back so one bad row cannot poison a whole listing.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a stored decimal string, with a fallback for scientific notation
/// by parsing as f64 first.
pub(crate) fn parse_decimal_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value_str) {
            Ok(f_val) => match Decimal::from_f64(f_val) {
                Some(dec_val) => dec_val,
                None => {
                    log::error!(
                        "Failed to convert {} '{}' (parsed as f64: {}) to Decimal.",
                        field_name,
                        value_str,
                        f_val
                    );
                    Decimal::ZERO
                }
            },
            Err(e_f64) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                    field_name, value_str, e_decimal, e_f64
                );
                Decimal::ZERO
            }
        },
    }
}

/// Parses a stored `YYYY-MM-DD` date, falling back to the epoch date.
pub(crate) fn parse_date_tolerant(value_str: &str, field_name: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value_str, "%Y-%m-%d").unwrap_or_else(|e| {
        log::error!("Failed to parse {} '{}': {}", field_name, value_str, e);
        NaiveDate::default()
    })
}

/// Parses a stored RFC 3339 timestamp, falling back to the current instant.
pub(crate) fn parse_datetime_tolerant(value_str: &str, field_name: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            log::error!("Failed to parse {} '{}': {}", field_name, value_str, e);
            Utc::now()
        })
}

/// Formats a date for storage.
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a timestamp for storage.
pub(crate) fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
