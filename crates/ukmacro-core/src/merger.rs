//! Top-level merge of a payload into the report document

use serde_json::Value;

use crate::config::{Clock, MergeConfig, SystemClock};
use crate::error::MergeError;
use crate::extract::{ExtractReport, TextExtractor};
use crate::migrate::migrate;
use crate::period::format_date;
use crate::structured::{merge_structured, StructuredReport};
use crate::types::Document;

/// New data, classified once before merging
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<'a> {
    Structured(Value),
    Text(&'a str),
}

impl<'a> Payload<'a> {
    /// JSON if it parses, bullet text otherwise
    pub fn classify(raw: &'a str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Payload::Structured(value),
            Err(err) => {
                tracing::debug!(error = %err, "payload is not JSON, parsing as bullet text");
                Payload::Text(raw)
            }
        }
    }
}

/// What happened to the existing report text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existing {
    /// Blank input, started from an empty report
    Blank,
    Loaded,
    /// Not valid JSON, replaced by an empty report
    Discarded,
}

/// Which producer consumed the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Structured(StructuredReport),
    Text(ExtractReport),
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub document: Document,
    pub existing: Existing,
    pub migrated: usize,
    pub applied: Applied,
}

/// Merges payloads into the report document
#[derive(Debug, Clone)]
pub struct Merger<C = SystemClock> {
    config: MergeConfig,
    extractor: TextExtractor,
    clock: C,
}

impl Merger<SystemClock> {
    pub fn with_defaults() -> Result<Self, MergeError> {
        Self::new(MergeConfig::default(), SystemClock)
    }
}

impl<C: Clock> Merger<C> {
    pub fn new(config: MergeConfig, clock: C) -> Result<Self, MergeError> {
        let extractor = TextExtractor::new(&config)?;
        Ok(Self {
            config,
            extractor,
            clock,
        })
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merge `payload` into `existing` and return the serialized report.
    ///
    /// Never fails. If the merge cannot complete, the existing report is
    /// returned with only `updated_at` refreshed, and if even that is not
    /// possible a fresh empty report is returned.
    pub fn merge(&self, existing: &str, payload: &str) -> String {
        let merged = self
            .try_merge(existing, payload)
            .and_then(|outcome| outcome.document.to_json().map_err(MergeError::Serialize));

        match merged {
            Ok(json) => return json,
            Err(err) => {
                tracing::error!(error = %err, "merge failed, keeping existing report");
            }
        }
        self.fallback(existing)
    }

    /// Merge without the top-level fallback
    pub fn try_merge(&self, existing: &str, payload: &str) -> Result<MergeOutcome, MergeError> {
        let today = self.clock.today();

        let (mut document, existing) = self.load_existing(existing)?;
        let migrated = migrate(&mut document, today);

        let created_at = if document.metadata.created_at.trim().is_empty() {
            format_date(today)
        } else {
            document.metadata.created_at.clone()
        };

        let applied = match Payload::classify(payload) {
            Payload::Structured(value) => {
                Applied::Structured(merge_structured(&mut document, &value))
            }
            Payload::Text(text) => Applied::Text(self.extractor.extract(&mut document, text, today)),
        };

        document.metadata.updated_at = format_date(today);
        document.metadata.created_at = created_at;

        Ok(MergeOutcome {
            document,
            existing,
            migrated,
            applied,
        })
    }

    fn load_existing(&self, existing: &str) -> Result<(Document, Existing), MergeError> {
        if existing.trim().is_empty() {
            return Ok((Document::empty(&self.config), Existing::Blank));
        }

        let value: Value = match serde_json::from_str(existing) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    line = err.line(),
                    column = err.column(),
                    "existing report is not valid JSON, discarding it"
                );
                return Ok((Document::empty(&self.config), Existing::Discarded));
            }
        };

        let document = serde_json::from_value(value).map_err(MergeError::Document)?;
        Ok((document, Existing::Loaded))
    }

    fn fallback(&self, existing: &str) -> String {
        let today = format_date(self.clock.today());

        if let Ok(mut value) = serde_json::from_str::<Value>(existing) {
            if let Some(metadata) = value.get_mut("metadata").and_then(Value::as_object_mut) {
                metadata.insert("updated_at".to_string(), Value::String(today.clone()));
                if let Ok(json) = serde_json::to_string_pretty(&value) {
                    return json;
                }
            }
        }

        let mut document = Document::empty(&self.config);
        document.metadata.created_at = today.clone();
        document.metadata.updated_at = today;
        document
            .to_json()
            .unwrap_or_else(|_| String::from("{}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FixedClock;
    use chrono::NaiveDate;
    use serde_json::json;

    fn merger() -> Merger<FixedClock> {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        Merger::new(MergeConfig::default(), clock).unwrap()
    }

    #[test]
    fn test_classify_payload() {
        assert!(matches!(
            Payload::classify(r#"{"economic_indicators": {}}"#),
            Payload::Structured(_)
        ));
        assert!(matches!(
            Payload::classify("- Interest Rate: 5% (Jan-24)"),
            Payload::Text(_)
        ));
        assert!(matches!(Payload::classify(""), Payload::Text("")));
    }

    #[test]
    fn test_blank_existing_starts_empty() {
        let outcome = merger().try_merge("  \n", "").unwrap();
        assert_eq!(outcome.existing, Existing::Blank);
        assert_eq!(outcome.document.metadata.created_at, "2024-02-10");
        assert_eq!(outcome.document.metadata.updated_at, "2024-02-10");
        assert_eq!(outcome.document.economic_indicators.len(), 3);
    }

    #[test]
    fn test_created_at_is_preserved() {
        let existing = json!({
            "metadata": {"created_at": "2023-01-01", "updated_at": "2023-06-01"},
            "economic_indicators": {},
            "report_summaries": {}
        })
        .to_string();

        let outcome = merger()
            .try_merge(&existing, "- Interest Rate: 5.25% (Jan-24)")
            .unwrap();
        assert_eq!(outcome.existing, Existing::Loaded);
        assert_eq!(outcome.document.metadata.created_at, "2023-01-01");
        assert_eq!(outcome.document.metadata.updated_at, "2024-02-10");
    }

    #[test]
    fn test_empty_created_at_is_set() {
        let existing = json!({"metadata": {"created_at": "", "updated_at": ""}}).to_string();
        let outcome = merger().try_merge(&existing, "").unwrap();
        assert_eq!(outcome.document.metadata.created_at, "2024-02-10");
    }

    #[test]
    fn test_invalid_existing_is_discarded() {
        let outcome = merger()
            .try_merge("{ invalid", "- Interest Rate: 5.25% (Jan-24)")
            .unwrap();
        assert_eq!(outcome.existing, Existing::Discarded);
        assert_eq!(outcome.document.indicator("interest_rate").len(), 1);
    }

    #[test]
    fn test_legacy_records_are_migrated_before_merge() {
        let existing = json!({
            "metadata": {"created_at": "2023-01-01", "updated_at": "2023-01-01"},
            "economic_indicators": {"interest_rate": [{"value": "5.00%", "month_period": "Dec-23"}]},
            "report_summaries": {}
        })
        .to_string();

        let outcome = merger()
            .try_merge(&existing, "- Interest Rate: 5.25% (Jan-24)")
            .unwrap();
        assert_eq!(outcome.migrated, 1);

        let rates = outcome.document.indicator("interest_rate");
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].date_published.as_deref(), Some("2023-12-01"));
        assert_eq!(rates[1].month_period.as_deref(), Some("Jan-24"));
    }

    #[test]
    fn test_structured_payload_routes_to_structured_merge() {
        let payload = json!({
            "economic_indicators": {"gdp_mom": {"value": "+0.1%", "date_published": "2024-01-12"}}
        })
        .to_string();

        let outcome = merger().try_merge("", &payload).unwrap();
        assert!(matches!(outcome.applied, Applied::Structured(ref r) if r.inserted == 1));
    }

    #[test]
    fn test_unreadable_existing_record_keeps_payload() {
        let existing = json!({
            "metadata": {"created_at": "2023-01-01", "updated_at": "2023-01-01"},
            "economic_indicators": {"interest_rate": [{"value": {"rate": "5%"}, "month_period": "Jan-24", "date_published": "2024-01-01"}]},
            "report_summaries": {}
        })
        .to_string();

        let out: Value =
            serde_json::from_str(&merger().merge(&existing, "- GDP +/- MoM: +0.1% (Jan-24)")).unwrap();
        assert_eq!(out["economic_indicators"]["gdp_mom"][0]["value"], "+0.1%");
        assert_eq!(
            out["economic_indicators"]["interest_rate"][0]["value"],
            json!({"rate": "5%"})
        );
        assert_eq!(out["metadata"]["created_at"], "2023-01-01");
    }

    #[test]
    fn test_non_object_payload_still_migrates() {
        let existing = json!({
            "metadata": {"created_at": "2023-01-01", "updated_at": "2023-01-01"},
            "economic_indicators": {"interest_rate": [{"value": "5%", "month_period": "Dec-23"}]},
            "report_summaries": {}
        })
        .to_string();

        let outcome = merger().try_merge(&existing, "[]").unwrap();
        assert_eq!(outcome.migrated, 1);
        assert!(matches!(outcome.applied, Applied::Structured(ref r) if *r == StructuredReport::default()));
        assert_eq!(
            outcome.document.indicator("interest_rate")[0].date_published.as_deref(),
            Some("2023-12-01")
        );
        assert_eq!(outcome.document.metadata.updated_at, "2024-02-10");
    }

    #[test]
    fn test_unusable_existing_falls_back_to_empty() {
        // Valid JSON, but neither a report nor something with metadata
        let out: Value = serde_json::from_str(&merger().merge("[1, 2, 3]", "")).unwrap();
        assert_eq!(out["metadata"]["created_at"], "2024-02-10");
        assert_eq!(out["metadata"]["updated_at"], "2024-02-10");
        assert!(out["economic_indicators"]["interest_rate"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_merge_output_is_two_space_indented() {
        let out = merger().merge("", "- Interest Rate: 5.25% (Jan-24)");
        assert!(out.starts_with("{\n  \"metadata\""));
    }
}
