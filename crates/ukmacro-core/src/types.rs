//! Report document types
//!
//! Reading is lenient: a record is any JSON object. Scalar fields are read as
//! text, and a known field holding an array or object is kept verbatim in
//! `extra` so it is written back unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::config::MergeConfig;
use crate::series::SeriesRecord;

pub type IndicatorSeries = Vec<IndicatorRecord>;
pub type SummarySeries = Vec<SummaryRecord>;

/// Document metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Metadata {
    pub created_at: String,
    pub updated_at: String,
    /// Anything else the snapshot writer or a person put here
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for Metadata {
    fn from(mut map: Map<String, Value>) -> Self {
        let created_at = take_scalar(&mut map, "created_at").unwrap_or_default();
        let updated_at = take_scalar(&mut map, "updated_at").unwrap_or_default();
        Self {
            created_at,
            updated_at,
            extra: map,
        }
    }
}

/// One published value of an economic indicator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct IndicatorRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_period: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IndicatorRecord {
    pub fn new(value: &str, date_published: &str, month_period: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            date_published: Some(date_published.to_string()),
            month_period: Some(month_period.to_string()),
            extra: Map::new(),
        }
    }
}

impl From<Map<String, Value>> for IndicatorRecord {
    fn from(mut map: Map<String, Value>) -> Self {
        let value = take_scalar(&mut map, "value");
        let date_published = take_scalar(&mut map, "date_published");
        let month_period = take_scalar(&mut map, "month_period");
        Self {
            value,
            date_published,
            month_period,
            extra: map,
        }
    }
}

impl SeriesRecord for IndicatorRecord {
    const DATE_FIELD: &'static str = "date_published";

    fn period(&self) -> Option<&str> {
        self.month_period.as_deref()
    }

    fn date(&self) -> Option<&str> {
        self.date_published.as_deref()
    }

    fn set_period(&mut self, period: String) {
        self.extra.remove("month_period");
        self.month_period = Some(period);
    }

    fn set_date(&mut self, date: String) {
        self.extra.remove(Self::DATE_FIELD);
        self.date_published = Some(date);
    }
}

/// One edition of a central-bank report summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct SummaryRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_period: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SummaryRecord {
    pub fn new(summary: &str, report_date: &str, month_period: &str) -> Self {
        Self {
            summary: Some(summary.to_string()),
            report_date: Some(report_date.to_string()),
            month_period: Some(month_period.to_string()),
            extra: Map::new(),
        }
    }
}

impl From<Map<String, Value>> for SummaryRecord {
    fn from(mut map: Map<String, Value>) -> Self {
        let summary = take_scalar(&mut map, "summary");
        let report_date = take_scalar(&mut map, "report_date");
        let month_period = take_scalar(&mut map, "month_period");
        Self {
            summary,
            report_date,
            month_period,
            extra: map,
        }
    }
}

impl SeriesRecord for SummaryRecord {
    const DATE_FIELD: &'static str = "report_date";

    fn period(&self) -> Option<&str> {
        self.month_period.as_deref()
    }

    fn date(&self) -> Option<&str> {
        self.report_date.as_deref()
    }

    fn set_period(&mut self, period: String) {
        self.extra.remove("month_period");
        self.month_period = Some(period);
    }

    fn set_date(&mut self, date: String) {
        self.extra.remove(Self::DATE_FIELD);
        self.report_date = Some(date);
    }
}

/// The persisted report (time-series sections plus any coexisting sections)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "metadata_or_default")]
    pub metadata: Metadata,
    #[serde(default, deserialize_with = "series_map")]
    pub economic_indicators: BTreeMap<String, IndicatorSeries>,
    #[serde(default, deserialize_with = "series_map")]
    pub report_summaries: BTreeMap<String, SummarySeries>,
    /// Sections owned by other readers, e.g. the scheduler's
    /// `current_economic_indicators` / `current_report_summaries`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Empty document with a series for every configured label
    pub fn empty(config: &MergeConfig) -> Self {
        let mut doc = Self::default();
        for label in &config.indicators {
            doc.economic_indicators
                .entry(label.key.clone())
                .or_default();
        }
        for label in &config.reports {
            doc.report_summaries.entry(label.key.clone()).or_default();
        }
        doc
    }

    pub fn indicator(&self, key: &str) -> &[IndicatorRecord] {
        self.economic_indicators
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn summary(&self, key: &str) -> &[SummaryRecord] {
        self.report_summaries
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of records across both sections
    pub fn record_count(&self) -> usize {
        self.economic_indicators.values().map(Vec::len).sum::<usize>()
            + self.report_summaries.values().map(Vec::len).sum::<usize>()
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Records of one series. A lone object is a one-entry series (older
/// snapshots); entries that are not objects are dropped.
pub(crate) fn series_records<R>(key: &str, entries: Value) -> Vec<R>
where
    R: From<Map<String, Value>>,
{
    let items = match entries {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        single => vec![single],
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(R::from(map)),
            other => {
                tracing::warn!(
                    series = key,
                    found = value_kind(&other),
                    "dropping series entry that is not an object"
                );
                None
            }
        })
        .collect()
}

fn series_map<'de, D, R>(deserializer: D) -> Result<BTreeMap<String, Vec<R>>, D::Error>
where
    D: Deserializer<'de>,
    R: From<Map<String, Value>>,
{
    let section = match Value::deserialize(deserializer)? {
        Value::Object(section) => section,
        Value::Null => return Ok(BTreeMap::new()),
        other => {
            tracing::warn!(
                found = value_kind(&other),
                "series section is not an object, ignoring it"
            );
            return Ok(BTreeMap::new());
        }
    };

    Ok(section
        .into_iter()
        .map(|(key, entries)| {
            let series = series_records(&key, entries);
            (key, series)
        })
        .collect())
}

fn metadata_or_default<'de, D>(deserializer: D) -> Result<Metadata, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => Metadata::from(map),
        Value::Null => Metadata::default(),
        other => {
            tracing::warn!(found = value_kind(&other), "metadata is not an object, resetting it");
            Metadata::default()
        }
    })
}

/// Remove `key` and return it as text. Numbers and bools are rendered, null
/// means absent, and arrays/objects are left in `map` untouched.
fn take_scalar(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    let text = match map.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            tracing::warn!(field = key, found = value_kind(other), "keeping non-scalar field as-is");
            return None;
        }
    };
    map.remove(key);
    text
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
