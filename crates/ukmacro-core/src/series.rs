//! Period-keyed upsert shared by the text and structured merge paths

use chrono::NaiveDate;

use crate::period::parse_date;

/// Sort key for records whose date is missing or unparseable (1900-01-01)
pub fn fallback_sort_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// A record that lives in a period-keyed, date-ordered series
pub trait SeriesRecord {
    /// JSON name of the date field the series is ordered by
    const DATE_FIELD: &'static str;

    fn period(&self) -> Option<&str>;

    fn date(&self) -> Option<&str>;

    fn set_period(&mut self, period: String);

    fn set_date(&mut self, date: String);

    /// Date used for ordering
    fn sort_date(&self) -> NaiveDate {
        self.date().and_then(parse_date).unwrap_or_else(fallback_sort_date)
    }
}

/// Outcome of a single upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

/// Insert `record`, replacing any record with the same period, then re-sort the series.
///
/// Replacement is a full overwrite. Periods compare as plain strings, so two
/// records whose period is empty are the same entry. A record with no period
/// field at all never matches and is appended.
pub fn upsert<R: SeriesRecord>(series: &mut Vec<R>, record: R) -> Upsert {
    let existing = match record.period() {
        Some(period) => series.iter().position(|r| r.period() == Some(period)),
        None => None,
    };

    let outcome = match existing {
        Some(index) => {
            series[index] = record;
            Upsert::Replaced
        }
        None => {
            series.push(record);
            Upsert::Inserted
        }
    };

    sort_series(series);
    outcome
}

/// Stable ascending sort by date field
pub fn sort_series<R: SeriesRecord>(series: &mut [R]) {
    series.sort_by_key(|r| r.sort_date());
}

/// True when every adjacent pair is in date order
pub fn is_chronological<R: SeriesRecord>(series: &[R]) -> bool {
    series
        .windows(2)
        .all(|pair| pair[0].sort_date() <= pair[1].sort_date())
}
