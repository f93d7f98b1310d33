//! Date helpers for the compact formats the Pageviews API speaks.
//!
//! - Query dates are `YYYYMMDD`.
//! - Per-article item timestamps are `YYYYMMDDHH`; the hour is always `00`
//!   for daily and monthly granularity and is ignored here.

use crate::error::{PageviewsError, Result};
use crate::models::DateRange;
use chrono::{Datelike, Days, NaiveDate};

/// Parse a `YYYYMMDD` string into a calendar date.
pub fn parse_compact_date(s: &str) -> Result<NaiveDate> {
    // chrono alone would accept signs and short fields here.
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PageviewsError::InvalidDate(format!(
            "expected YYYYMMDD, got '{s}'"
        )));
    }
    NaiveDate::parse_from_str(s, "%Y%m%d")
        .map_err(|e| PageviewsError::InvalidDate(format!("'{s}': {e}")))
}

/// Format a date as `YYYYMMDD`.
pub fn format_compact_date(d: NaiveDate) -> String {
    d.format("%Y%m%d").to_string()
}

/// Parse a per-article item timestamp (`YYYYMMDDHH`) into its date.
pub fn parse_timestamp(ts: &str) -> Result<NaiveDate> {
    match ts.get(..8) {
        Some(day) => parse_compact_date(day),
        _ => Err(PageviewsError::InvalidDate(format!(
            "expected YYYYMMDDHH timestamp, got '{ts}'"
        ))),
    }
}

/// Seven days starting at `start`, inclusive on both ends.
pub fn week_range(start: NaiveDate) -> Result<DateRange> {
    let end = start
        .checked_add_days(Days::new(6))
        .ok_or_else(|| PageviewsError::InvalidDate(format!("week starting {start} overflows")))?;
    Ok(DateRange { start, end })
}

/// First and last day of `year`-`month`, leap years included.
pub fn month_range(year: i32, month: u32) -> Result<DateRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| PageviewsError::InvalidDate(format!("invalid month {year}-{month}")))?;
    let (ny, nm) = if start.month() == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| PageviewsError::InvalidDate(format!("invalid month {year}-{month}")))?;
    Ok(DateRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_compact_dates() {
        assert_eq!(parse_compact_date("20221218").unwrap(), ymd(2022, 12, 18));
        assert!(parse_compact_date("2022-12-18").is_err());
        assert!(parse_compact_date("20221232").is_err());
        assert!(parse_compact_date("2022121").is_err());
        assert!(parse_compact_date(" 20221218 ").is_err());
        assert!(parse_compact_date("20221218 ").is_err());
        assert!(parse_compact_date("+2022121").is_err());
        assert_eq!(parse_compact_date("20240229").unwrap(), ymd(2024, 2, 29));
        assert!(parse_compact_date("20230229").is_err());
        assert_eq!(format_compact_date(ymd(2023, 1, 5)), "20230105");
    }

    #[test]
    fn timestamp_ignores_hour() {
        assert_eq!(parse_timestamp("2022121800").unwrap(), ymd(2022, 12, 18));
        assert!(parse_timestamp("202212").is_err());
        assert!(parse_timestamp(" 2022121800").is_err());
    }

    #[test]
    fn week_crosses_year_boundary() {
        let r = week_range(ymd(2022, 12, 28)).unwrap();
        assert_eq!(r.end, ymd(2023, 1, 3));
        assert!(r.contains(ymd(2023, 1, 1)));
        assert!(!r.contains(ymd(2023, 1, 4)));
    }

    #[test]
    fn month_ranges_respect_leap_years() {
        assert_eq!(month_range(2024, 2).unwrap().end, ymd(2024, 2, 29));
        assert_eq!(month_range(2023, 2).unwrap().end, ymd(2023, 2, 28));
        assert_eq!(month_range(1900, 2).unwrap().end, ymd(1900, 2, 28));
        assert_eq!(month_range(2022, 12).unwrap().end, ymd(2022, 12, 31));
        assert!(month_range(2022, 13).is_err());
        assert!(month_range(2022, 0).is_err());
    }
}
