//! Command handlers, one module per top-level subcommand.

pub mod asset;
pub mod history;
pub mod stats;
pub mod user;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Parse a `YYYY-MM-DD` CLI argument as midnight UTC.
pub(crate) fn parse_purchase_date(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid purchase date '{s}' (expected YYYY-MM-DD): {e}"))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::parse_purchase_date;

    #[test]
    fn parses_iso_dates() {
        let parsed = parse_purchase_date("2026-03-14").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-03-14T00:00:00+00:00");
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse_purchase_date("14/03/2026").is_err());
    }
}
