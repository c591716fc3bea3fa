//! Text and JSON scalar conversions shared by the parsers.
//!
//! Decimals are always built from their textual form so that `0.1` stays `0.1`.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::core::{BvbError, Schema};

/// Timezone the exchange reports trading days in.
pub const EXCHANGE_TZ: Tz = chrono_tz::Europe::Bucharest;

/// Treats empty cells and the exchange's `-` placeholder as absent.
#[must_use]
pub(crate) fn non_placeholder(raw: &str) -> Option<&str> {
    let t = raw.trim();
    if t.is_empty() || t == "-" { None } else { Some(t) }
}

/// Parses a non-negative integer count such as `"1,234,567"` or `"1 234 567"`.
pub(crate) fn parse_count(raw: &str, schema: Schema, field: &str) -> Result<Option<u64>, BvbError> {
    let Some(t) = non_placeholder(raw) else {
        return Ok(None);
    };
    let digits: String = t
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '\u{a0}')
        .collect();
    digits
        .parse::<u64>()
        .map(Some)
        .map_err(|e| BvbError::parse(schema, field, format!("`{t}` is not a count: {e}")))
}

/// Parses a decimal written with either `.` or `,` as separator; dashes are dropped.
pub(crate) fn parse_decimal_text(
    raw: &str,
    schema: Schema,
    field: &str,
) -> Result<Option<Decimal>, BvbError> {
    let cleaned = raw.replace('-', "").replace(',', ".");
    let t = cleaned.trim();
    if t.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(t)
        .map(Some)
        .map_err(|e| BvbError::parse(schema, field, format!("`{t}` is not a decimal: {e}")))
}

/// Converts a JSON number (or numeric string) to a `Decimal` without passing
/// through `f64` arithmetic. `null` yields `None`.
pub(crate) fn json_to_decimal(
    value: &Value,
    schema: Schema,
    field: &str,
) -> Result<Option<Decimal>, BvbError> {
    let text = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().to_string(),
        other => {
            return Err(BvbError::parse(schema, field, format!("expected number, got {other}")));
        }
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|e| BvbError::parse(schema, field, format!("`{text}` is not a decimal: {e}")))
}

/// Accepts u64, integer-like floats (e.g., `4.0`), numeric strings or `null`.
pub(crate) fn json_to_u64(value: &Value, schema: Schema, field: &str) -> Result<Option<u64>, BvbError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Ok(Some(u));
            }
            let f = n
                .as_f64()
                .ok_or_else(|| BvbError::parse(schema, field, "unsupported number type"))?;
            let r = f.round();
            if f.is_finite() && (f - r).abs() < 1e-9 && r >= 0.0 {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let whole = r as u64;
                Ok(Some(whole))
            } else {
                Err(BvbError::parse(
                    schema,
                    field,
                    format!("expected non-negative integer, got {f}"),
                ))
            }
        }
        Value::String(s) => parse_count(s, schema, field),
        other => Err(BvbError::parse(
            schema,
            field,
            format!("expected integer, got {other}"),
        )),
    }
}

/// Convert i64 timestamp to `DateTime<Utc>`.
#[must_use]
pub fn i64_to_datetime(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or_default()
}

/// Calendar date of a Unix timestamp in the exchange timezone.
#[must_use]
pub fn exchange_date(timestamp: i64) -> NaiveDate {
    i64_to_datetime(timestamp)
        .with_timezone(&EXCHANGE_TZ)
        .date_naive()
}

/// Today's date at the exchange.
#[must_use]
pub fn exchange_today() -> NaiveDate {
    Utc::now().with_timezone(&EXCHANGE_TZ).date_naive()
}

/// Unix timestamp of local midnight (start of `date`) at the exchange.
pub(crate) fn exchange_day_start(date: NaiveDate) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    EXCHANGE_TZ
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc().timestamp(), |dt| dt.timestamp())
}

/// Unix timestamp of the last second of `date` at the exchange.
pub(crate) fn exchange_day_end(date: NaiveDate) -> i64 {
    let naive = date.and_hms_opt(23, 59, 59).unwrap_or_default();
    EXCHANGE_TZ
        .from_local_datetime(&naive)
        .latest()
        .map_or_else(|| naive.and_utc().timestamp(), |dt| dt.timestamp())
}
