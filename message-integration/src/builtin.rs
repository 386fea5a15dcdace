//! Conversions for primitive DAML types.
//!
//! The DAML JSON API carries `Int64` and `Numeric` values as strings, dates as
//! `YYYY-MM-DD` and timestamps as UTC RFC 3339. CDM documents are looser, so
//! decoding accepts a few extra spellings while encoding restores plain JSON
//! numbers.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{Number, Value};

use crate::error::StrategyError;
use crate::metadata::Builtin;
use crate::strategy::type_name;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Convert a CDM primitive into its DAML JSON form.
pub fn decode_builtin(kind: Builtin, value: &Value, path: &str) -> Result<Value, StrategyError> {
    match kind {
        Builtin::Text => expect_str(value, path).map(|s| Value::String(s.to_string())),
        Builtin::Bool => expect_bool(value, path),
        Builtin::Int => parse_int(value, path).map(|n| Value::String(n.to_string())),
        Builtin::Decimal => decimal_text(value, path).map(Value::String),
        Builtin::Date => parse_date(value, path).map(|d| Value::String(format_date(d))),
        Builtin::Time => parse_time(value, path).map(|t| Value::String(format_time(t))),
    }
}

/// Convert a DAML JSON primitive back into its CDM form.
pub fn encode_builtin(kind: Builtin, value: &Value, path: &str) -> Result<Value, StrategyError> {
    match kind {
        Builtin::Text => expect_str(value, path).map(|s| Value::String(s.to_string())),
        Builtin::Bool => expect_bool(value, path),
        Builtin::Int => parse_int(value, path).map(|n| Value::Number(n.into())),
        Builtin::Decimal => decimal_number(value, path),
        Builtin::Date => expect_str(value, path)
            .and_then(|s| parse_date_str(s, path))
            .map(|d| Value::String(format_date(d))),
        Builtin::Time => parse_time(value, path).map(|t| Value::String(format_time(t))),
    }
}

fn expect_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, StrategyError> {
    value.as_str().ok_or_else(|| {
        StrategyError::mismatch(path, format!("expected string, found {}", type_name(value)))
    })
}

fn expect_bool(value: &Value, path: &str) -> Result<Value, StrategyError> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        other => Err(StrategyError::mismatch(
            path,
            format!("expected boolean, found {}", type_name(other)),
        )),
    }
}

fn parse_int(value: &Value, path: &str) -> Result<i64, StrategyError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        other => {
            return Err(StrategyError::mismatch(
                path,
                format!("expected integer, found {}", type_name(other)),
            ))
        }
    };
    parsed.ok_or_else(|| {
        StrategyError::mismatch(path, format!("'{value}' is not a 64-bit integer"))
    })
}

fn decimal_text(value: &Value, path: &str) -> Result<String, StrategyError> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(trimmed.to_string()),
                _ => Err(StrategyError::mismatch(path, format!("'{s}' is not a decimal"))),
            }
        }
        other => Err(StrategyError::mismatch(
            path,
            format!("expected decimal, found {}", type_name(other)),
        )),
    }
}

fn decimal_number(value: &Value, path: &str) -> Result<Value, StrategyError> {
    let text = decimal_text(value, path)?;
    if let Ok(n) = text.parse::<i64>() {
        return Ok(Value::Number(n.into()));
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| StrategyError::mismatch(path, format!("'{text}' is not a finite decimal")))
}

fn parse_date(value: &Value, path: &str) -> Result<NaiveDate, StrategyError> {
    match value {
        Value::String(s) => parse_date_str(s, path),
        Value::Object(parts) => {
            let part = |key: &str| parts.get(key).and_then(Value::as_i64);
            let (Some(year), Some(month), Some(day)) = (part("year"), part("month"), part("day"))
            else {
                return Err(StrategyError::mismatch(
                    path,
                    "date object needs integer 'year', 'month' and 'day'",
                ));
            };
            i32::try_from(year)
                .ok()
                .zip(u32::try_from(month).ok())
                .zip(u32::try_from(day).ok())
                .and_then(|((y, m), d)| NaiveDate::from_ymd_opt(y, m, d))
                .ok_or_else(|| {
                    let reason = format!("{year}-{month}-{day} is not a calendar date");
                    StrategyError::mismatch(path, reason)
                })
        }
        other => Err(StrategyError::mismatch(
            path,
            format!("expected date, found {}", type_name(other)),
        )),
    }
}

fn parse_date_str(s: &str, path: &str) -> Result<NaiveDate, StrategyError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| StrategyError::mismatch(path, format!("'{s}' is not a YYYY-MM-DD date: {e}")))
}

fn parse_time(value: &Value, path: &str) -> Result<DateTime<Utc>, StrategyError> {
    let s = expect_str(value, path)?;
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            StrategyError::mismatch(path, format!("'{s}' is not an RFC 3339 timestamp: {e}"))
        })
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
