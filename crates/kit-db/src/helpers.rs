//! Row-to-entity parsing helpers.
//!
//! Every repo needs to convert `libsql::Row` (column-indexed) into typed
//! entity structs. These helpers isolate the parsing logic and handle the
//! dual datetime format issue (`SQLite`'s `datetime('now')` vs Rust's
//! `to_rfc3339()`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::StoreError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s
/// default format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `StoreError::Query` if the string cannot be parsed as either
/// format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `StoreError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, StoreError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all kit-core enums that use `#[serde(rename_all =
/// "kebab-case")]`.
///
/// # Errors
///
/// Returns `StoreError::Query` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, StoreError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| StoreError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Parse an optional TEXT column into an optional enum.
///
/// # Errors
///
/// Returns `StoreError::Query` if a non-empty string matches no variant.
pub fn parse_optional_enum<T: serde::de::DeserializeOwned>(
    s: Option<&str>,
) -> Result<Option<T>, StoreError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_enum(s)?)),
        _ => Ok(None),
    }
}

/// Parse an optional TEXT column holding a fixed-point decimal.
///
/// # Errors
///
/// Returns `StoreError::InvalidState` if a non-empty string is not a
/// valid decimal.
pub fn parse_optional_decimal(s: Option<&str>) -> Result<Option<Decimal>, StoreError> {
    match s {
        Some(s) if !s.is_empty() => Decimal::from_str(s)
            .map(Some)
            .map_err(|e| StoreError::InvalidState(format!("Invalid decimal '{s}': {e}"))),
        _ => Ok(None),
    }
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and
/// empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `StoreError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, StoreError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use kit_core::enums::AssetStatus;

    #[test]
    fn parses_rfc3339_and_sqlite_datetimes() {
        let rfc = parse_datetime("2026-02-09T14:30:00+00:00").unwrap();
        let sqlite = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(rfc, sqlite);
    }

    #[test]
    fn rejects_garbage_datetime() {
        assert!(parse_datetime("last tuesday").is_err());
    }

    #[test]
    fn parses_kebab_case_enum() {
        let status: AssetStatus = parse_enum("under-repair").unwrap();
        assert_eq!(status, AssetStatus::UnderRepair);
    }

    #[test]
    fn optional_enum_treats_empty_as_none() {
        let none: Option<AssetStatus> = parse_optional_enum(None).unwrap();
        assert_eq!(none, None);
        let empty: Option<AssetStatus> = parse_optional_enum(Some("")).unwrap();
        assert_eq!(empty, None);
    }

    #[test]
    fn parses_decimal_exactly() {
        let price = parse_optional_decimal(Some("1299.99")).unwrap().unwrap();
        assert_eq!(price.to_string(), "1299.99");
        assert!(parse_optional_decimal(Some("not-a-price")).is_err());
        assert_eq!(parse_optional_decimal(None).unwrap(), None);
    }
}
