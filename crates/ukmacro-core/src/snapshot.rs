//! Freshly generated report snapshots (overwrite path, no merging)

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Remove a surrounding markdown code fence, if any
pub fn strip_code_fence(raw: &str) -> &str {
    let mut content = raw.trim();
    if let Some(rest) = content.strip_prefix("```json") {
        content = rest;
    } else if let Some(rest) = content.strip_prefix("```") {
        content = rest;
    }
    if let Some(rest) = content.strip_suffix("```") {
        content = rest;
    }
    content.trim()
}

/// RFC 3339 UTC timestamp with a `Z` suffix
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Prepare agent output for writing as the report.
///
/// Valid JSON objects get `metadata.generated_at` and `metadata.updated_at`
/// stamped with `now` and are pretty-printed. Anything else is returned
/// unfenced but otherwise untouched.
pub fn prepare_snapshot(raw: &str, now: DateTime<Utc>) -> String {
    let content = strip_code_fence(raw);

    let mut parsed: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, "snapshot is not valid JSON, saving it as-is");
            return content.to_string();
        }
    };

    let Some(root) = parsed.as_object_mut() else {
        tracing::warn!("snapshot is not a JSON object, saving it without metadata");
        return content.to_string();
    };

    let metadata = root
        .entry("metadata")
        .or_insert_with(|| Value::Object(Map::new()));
    if !metadata.is_object() {
        *metadata = Value::Object(Map::new());
    }
    if let Some(metadata) = metadata.as_object_mut() {
        let stamp = Value::String(timestamp(now));
        metadata.insert("generated_at".to_string(), stamp.clone());
        metadata.insert("updated_at".to_string(), stamp);
    }

    serde_json::to_string_pretty(&parsed).unwrap_or_else(|_| content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 17, 5, 9).unwrap()
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(timestamp(now()), "2024-03-04T17:05:09Z");
    }

    #[test]
    fn test_prepare_snapshot_stamps_metadata() {
        let raw = "```json\n{\"current_economic_indicators\": {\"interest_rate\": {\"value\": \"5.25%\"}}}\n```";
        let out: Value = serde_json::from_str(&prepare_snapshot(raw, now())).unwrap();

        assert_eq!(out["metadata"]["generated_at"], "2024-03-04T17:05:09Z");
        assert_eq!(out["metadata"]["updated_at"], "2024-03-04T17:05:09Z");
        assert_eq!(
            out["current_economic_indicators"]["interest_rate"]["value"],
            "5.25%"
        );
    }

    #[test]
    fn test_prepare_snapshot_keeps_existing_metadata_fields() {
        let raw = r#"{"metadata": {"source": "agent", "generated_at": "old"}}"#;
        let out: Value = serde_json::from_str(&prepare_snapshot(raw, now())).unwrap();
        assert_eq!(out["metadata"]["source"], "agent");
        assert_eq!(out["metadata"]["generated_at"], "2024-03-04T17:05:09Z");
    }

    #[test]
    fn test_prepare_snapshot_invalid_json_is_passed_through() {
        let raw = "```\nnot json at all\n```";
        assert_eq!(prepare_snapshot(raw, now()), "not json at all");
    }
}
