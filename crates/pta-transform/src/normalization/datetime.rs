//! Date/time parsing for heterogeneous date columns.
//!
//! Every cell is parsed on its own, so a single column may mix ISO 8601,
//! US, European and textual month formats. Ambiguous numeric dates such as
//! `01/02/2024` are read month-first. Two-digit years are tried only after
//! every four-digit form has failed (`00`-`68` → 20xx, `69`-`99` → 19xx).
//! A parse landing outside 1900-2100 is discarded. Partial dates resolve to
//! the first instant they cover (`2024-03` → 2024-03-01 00:00). Values carrying a UTC
//! offset are converted to UTC and the offset dropped.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Years a parsed date may fall in.
const PLAUSIBLE_YEARS: RangeInclusive<i32> = 1900..=2100;

const OFFSET_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

const DATETIME_FORMATS: [&str; 21] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
    "%d-%b-%Y %H:%M",
    "%m/%d/%Y %H:%M:%S", // US
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d/%m/%Y %H:%M:%S", // European, day > 12
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y-%m-%d %I:%M %p",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
];

const DATE_FORMATS: [&str; 23] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d-%b-%Y",  // 15-Jan-2024
    "%d-%B-%Y",  // 15-January-2024
    "%m/%d/%Y",  // US: 01/15/2024
    "%d/%m/%Y",  // European: 15/01/2024
    "%m-%d-%Y",  // 01-15-2024
    "%d-%m-%Y",  // 15-01-2024
    "%d.%m.%Y",  // German: 15.01.2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%Y-%b-%d",  // 2024-Jan-15
    "%b %d %Y",  // Jan 15 2024
    "%B %d %Y",  // January 15 2024
    "%a, %d %b %Y", // Mon, 15 Jan 2024
    "%a %b %d %Y", // Mon Jan 15 2024
    "%m/%d/%y",  // 01/15/24
    "%d/%m/%y",  // 15/01/24
    "%d-%b-%y",  // 15-Jan-24
    "%d.%m.%y",  // 15.01.24
];

const MONTH_FORMATS: [&str; 4] = ["%Y-%m", "%Y/%m", "%b %Y", "%B %Y"];

/// Parse one date cell into a timestamp.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_offset_datetime(trimmed)
        .or_else(|| try_parse_datetime(trimmed))
        .or_else(|| try_parse_date(trimmed).map(|d| d.and_time(NaiveTime::MIN)))
        .or_else(|| try_parse_partial(trimmed).map(|d| d.and_time(NaiveTime::MIN)))
}

fn is_plausible(date: &impl Datelike) -> bool {
    PLAUSIBLE_YEARS.contains(&date.year())
}

fn try_parse_offset_datetime(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .ok()
        .or_else(|| {
            OFFSET_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
        })
        .map(|dt| dt.naive_utc())
        .filter(is_plausible)
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(value, fmt)
            .ok()
            .filter(is_plausible)
    })
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    if let Some(date) = try_parse_compact_date(value) {
        return Some(date);
    }
    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(value, fmt)
            .ok()
            .filter(is_plausible)
    })
}

/// `YYYYMMDD` without delimiters.
fn try_parse_compact_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse::<i32>().ok()?;
    let month = value[4..6].parse::<u32>().ok()?;
    let day = value[6..8].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).filter(is_plausible)
}

/// Year-month and bare-year values.
fn try_parse_partial(value: &str) -> Option<NaiveDate> {
    if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
        let year = value.parse::<i32>().ok()?;
        if PLAUSIBLE_YEARS.contains(&year) {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
        return None;
    }
    MONTH_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(&format!("{value} 01"), &format!("{fmt} %d"))
            .ok()
            .filter(is_plausible)
    })
}

/// Format a timestamp as an ISO 8601 calendar date.
pub fn format_iso8601_date(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn parses_mixed_date_formats() {
        let expected = ymd(2024, 1, 15);
        for input in [
            "2024-01-15",
            "2024/01/15",
            "01/15/2024",
            "15/01/2024",
            "15-Jan-2024",
            "Jan 15, 2024",
            "January 15, 2024",
            "15 Jan 2024",
            "15.01.2024",
            "20240115",
            " 2024-01-15 ",
        ] {
            assert_eq!(parse_timestamp(input), Some(expected), "{input}");
        }
    }

    #[test]
    fn two_digit_years_resolve_to_the_right_century() {
        assert_eq!(parse_timestamp("01/15/24"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_timestamp("1/5/24"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_timestamp("15-Jan-24"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_timestamp("15/01/24"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_timestamp("12/31/99"), Some(ymd(1999, 12, 31)));
        assert_eq!(
            parse_timestamp("01/15/24 09:30"),
            Some(ymd_hms(2024, 1, 15, 9, 30, 0))
        );
    }

    #[test]
    fn implausible_years_are_rejected() {
        assert_eq!(parse_timestamp("0024-01-15"), None);
        assert_eq!(parse_timestamp("3024-01-15"), None);
        assert_eq!(parse_timestamp("0024-01"), None);
    }

    #[test]
    fn parses_textual_dates_without_commas() {
        let expected = ymd(2024, 1, 15);
        for input in [
            "Jan 15 2024",
            "January 15 2024",
            "Mon, 15 Jan 2024",
            "Mon Jan 15 2024",
        ] {
            assert_eq!(parse_timestamp(input), Some(expected), "{input}");
        }
        assert_eq!(
            parse_timestamp("Mon, 15 Jan 2024 10:30:00 +0200"),
            Some(ymd_hms(2024, 1, 15, 8, 30, 0))
        );
    }

    #[test]
    fn ambiguous_numeric_dates_are_month_first() {
        assert_eq!(parse_timestamp("01/02/2024"), Some(ymd(2024, 1, 2)));
    }

    #[test]
    fn parses_datetimes() {
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:45"),
            Some(ymd_hms(2024, 1, 15, 10, 30, 45))
        );
        assert_eq!(
            parse_timestamp("2024-01-15 10:30"),
            Some(ymd_hms(2024, 1, 15, 10, 30, 0))
        );
        assert_eq!(
            parse_timestamp("01/15/2024 02:30 PM"),
            Some(ymd_hms(2024, 1, 15, 14, 30, 0))
        );
    }

    #[test]
    fn offsets_convert_to_utc() {
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00+02:00"),
            Some(ymd_hms(2024, 1, 15, 8, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00Z"),
            Some(ymd_hms(2024, 1, 15, 10, 30, 0))
        );
    }

    #[test]
    fn partial_dates_start_of_period() {
        assert_eq!(parse_timestamp("2024-03"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_timestamp("Mar 2024"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_timestamp("2024"), Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-01"), None);
        assert_eq!(parse_timestamp("100"), None);
    }

    #[test]
    fn formats_iso_date() {
        assert_eq!(format_iso8601_date(ymd_hms(2024, 1, 5, 9, 0, 0)), "2024-01-05");
    }
}
