//! In-place repair of records written by older report versions

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::period::{current_period, date_to_period, format_date, period_to_date};
use crate::series::{is_chronological, sort_series, SeriesRecord};
use crate::types::{Document, IndicatorRecord, SummaryRecord};

static BRACKETED_PERIOD_RE: OnceLock<Regex> = OnceLock::new();
static STRIP_PERIOD_RE: OnceLock<Regex> = OnceLock::new();

fn bracketed_period_re() -> &'static Regex {
    BRACKETED_PERIOD_RE.get_or_init(|| Regex::new(r"\((\w{3}-\d{2})\)").unwrap())
}

fn strip_period_re() -> &'static Regex {
    STRIP_PERIOD_RE.get_or_init(|| Regex::new(r"\s*\(\w{3}-\d{2}\)").unwrap())
}

/// Bring every record in `doc` up to the current schema and put every series
/// in date order.
///
/// Returns the number of records that changed. Running it again on the result
/// changes nothing.
pub fn migrate(doc: &mut Document, today: NaiveDate) -> usize {
    let mut repaired = 0;
    let mut reordered = 0;

    for series in doc.economic_indicators.values_mut() {
        for record in series.iter_mut() {
            if migrate_indicator(record, today) {
                repaired += 1;
            }
        }
        if !is_chronological(series) {
            sort_series(series);
            reordered += 1;
        }
    }

    for series in doc.report_summaries.values_mut() {
        for record in series.iter_mut() {
            if migrate_summary(record, today) {
                repaired += 1;
            }
        }
        if !is_chronological(series) {
            sort_series(series);
            reordered += 1;
        }
    }

    if repaired > 0 || reordered > 0 {
        tracing::debug!(repaired, reordered, "migrated legacy records");
    }
    repaired
}

fn migrate_indicator(record: &mut IndicatorRecord, today: NaiveDate) -> bool {
    if record.date_published.is_none() {
        let Some(period) = record.month_period.as_deref() else {
            return false;
        };
        let date = format_date(period_to_date(period, today));
        record.set_date(date);
        return true;
    }

    if record.month_period.is_none() {
        let period = record
            .date_published
            .as_deref()
            .map(date_to_period)
            .unwrap_or_default();
        if period.is_empty() {
            return false;
        }
        record.set_period(period);
        return true;
    }

    false
}

fn migrate_summary(record: &mut SummaryRecord, today: NaiveDate) -> bool {
    if record.report_date.is_none() {
        let text = record.summary.as_deref().unwrap_or("");
        let embedded = bracketed_period_re().captures(text).map(|cap| {
            let cleaned = strip_period_re().replace_all(text, "").trim().to_string();
            (cap[1].to_string(), cleaned)
        });

        let period = match embedded {
            Some((period, cleaned)) => {
                record.summary = Some(cleaned);
                period
            }
            None => record
                .month_period
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| current_period(today)),
        };
        record.set_date(format_date(period_to_date(&period, today)));
        record.set_period(period);
        return true;
    }

    if record.month_period.is_none() {
        let period = record
            .report_date
            .as_deref()
            .map(date_to_period)
            .unwrap_or_default();
        record.set_period(period);
        return true;
    }

    false
}
