//! Conversion between period tokens ("Jan-24") and ISO dates

use chrono::{Datelike, Month, NaiveDate};

/// ISO calendar date format used throughout the report
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Period token format ("Jan-24")
pub const PERIOD_FORMAT: &str = "%b-%y";

/// Parse a `Mon-YY` token into the first day of that month.
///
/// The two-digit year always lands in the 2000s. Returns `None` for anything
/// that is not exactly a three-letter month abbreviation, a dash and two digits.
pub fn parse_period(period: &str) -> Option<NaiveDate> {
    let (month, year) = period.trim().split_once('-')?;
    if month.len() != 3 || year.len() != 2 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month: Month = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month.number_from_month(), 1)
}

/// Convert a period token to a date, falling back to `today` when the token is invalid
pub fn period_to_date(period: &str, today: NaiveDate) -> NaiveDate {
    parse_period(period).unwrap_or(today)
}

/// Convert an ISO date string to a period token, or an empty string if it does not parse
pub fn date_to_period(date: &str) -> String {
    parse_date(date).map(format_period).unwrap_or_default()
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_period(date: NaiveDate) -> String {
    date.format(PERIOD_FORMAT).to_string()
}

/// Period token for the month containing `date`
pub fn current_period(date: NaiveDate) -> String {
    match date.with_day(1) {
        Some(first) => format_period(first),
        None => format_period(date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 17).unwrap()
    }

    #[test]
    fn test_period_to_date_known_months() {
        assert_eq!(format_date(period_to_date("Jan-24", today())), "2024-01-01");
        assert_eq!(format_date(period_to_date("Dec-23", today())), "2023-12-01");
        assert_eq!(format_date(period_to_date("Sep-99", today())), "2099-09-01");
    }

    #[test]
    fn test_period_month_is_case_insensitive() {
        assert_eq!(format_date(period_to_date("jan-24", today())), "2024-01-01");
        assert_eq!(format_date(period_to_date("FEB-24", today())), "2024-02-01");
    }

    #[test]
    fn test_invalid_period_falls_back_to_today() {
        for token in ["", "Foo-24", "Jan-2024", "January-24", "Jan24", "Jan-ab"] {
            assert_eq!(period_to_date(token, today()), today(), "token {token:?}");
        }
    }

    #[test]
    fn test_date_to_period() {
        assert_eq!(date_to_period("2024-01-01"), "Jan-24");
        assert_eq!(date_to_period("2023-12-15"), "Dec-23");
        assert_eq!(date_to_period("not a date"), "");
        assert_eq!(date_to_period(""), "");
    }

    #[test]
    fn test_current_period() {
        assert_eq!(current_period(today()), "Jun-25");
    }
}
