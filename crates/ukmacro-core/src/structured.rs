//! Merge of JSON payloads into the time-series sections

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::period::date_to_period;
use crate::series::{upsert, SeriesRecord, Upsert};
use crate::types::{value_kind, Document, IndicatorRecord, SummaryRecord};

pub const INDICATORS_SECTION: &str = "economic_indicators";
pub const SUMMARIES_SECTION: &str = "report_summaries";

/// Counts from one structured merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredReport {
    pub inserted: usize,
    pub replaced: usize,
    pub skipped: usize,
    /// Series that did not exist before this merge
    pub new_series: Vec<String>,
}

/// Merge `payload` into `doc`.
///
/// Keys are not restricted to the configured vocabulary: an unknown key starts
/// a new series. Each value may be one record or an array of records. A
/// payload or section that is not an object carries nothing to merge.
pub fn merge_structured(doc: &mut Document, payload: &Value) -> StructuredReport {
    let mut report = StructuredReport::default();

    let Some(payload) = payload.as_object() else {
        tracing::debug!(found = value_kind(payload), "payload has no sections to merge");
        return report;
    };

    if let Some(section) = payload.get(INDICATORS_SECTION) {
        merge_section::<IndicatorRecord>(
            &mut doc.economic_indicators,
            INDICATORS_SECTION,
            section,
            &mut report,
        );
    }
    if let Some(section) = payload.get(SUMMARIES_SECTION) {
        merge_section::<SummaryRecord>(
            &mut doc.report_summaries,
            SUMMARIES_SECTION,
            section,
            &mut report,
        );
    }

    report
}

fn merge_section<R>(
    target: &mut BTreeMap<String, Vec<R>>,
    name: &str,
    section: &Value,
    report: &mut StructuredReport,
) where
    R: SeriesRecord + From<Map<String, Value>>,
{
    let Some(entries) = section.as_object() else {
        tracing::debug!(section = name, found = value_kind(section), "ignoring section that is not an object");
        return;
    };

    for (key, data) in entries {
        if !target.contains_key(key) {
            report.new_series.push(key.clone());
        }
        let series = target.entry(key.clone()).or_default();

        let items: Vec<&Value> = match data {
            Value::Array(items) => items.iter().collect(),
            single => vec![single],
        };

        for item in items {
            let Some(record) = normalize::<R>(item) else {
                tracing::debug!(section = name, key = %key, "skipping malformed entry");
                report.skipped += 1;
                continue;
            };
            match upsert(series, record) {
                Upsert::Inserted => report.inserted += 1,
                Upsert::Replaced => report.replaced += 1,
            }
        }
    }
}

/// Build one record, deriving `month_period` from the date field when it is missing
fn normalize<R>(item: &Value) -> Option<R>
where
    R: SeriesRecord + From<Map<String, Value>>,
{
    let mut record = R::from(item.as_object()?.clone());
    if record.period().map_or(true, str::is_empty) {
        let period = record.date().map(date_to_period).unwrap_or_default();
        if period.is_empty() {
            tracing::debug!(
                field = R::DATE_FIELD,
                "entry has neither a period nor a usable date"
            );
        }
        record.set_period(period);
    }
    Some(record)
}
