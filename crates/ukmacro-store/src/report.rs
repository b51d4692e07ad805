//! Read-modify-write operations on the report file

use std::path::Path;

use ukmacro_core::{prepare_snapshot, Clock, MergeConfig, Merger, SystemClock};

use crate::error::{Result, StoreError};
use crate::io::{read_report, write_report};

/// Merge `payload` into the report at `path` and write the result back.
///
/// Returns the JSON that was written.
pub fn merge_report<C: Clock>(merger: &Merger<C>, path: &Path, payload: &str) -> Result<String> {
    let existing = read_report(path)?;
    let merged = merger.merge(&existing, payload);
    write_report(path, &merged)?;
    Ok(merged)
}

/// Overwrite the report at `path` with a freshly generated snapshot.
///
/// Returns the JSON (or raw text, if the snapshot was not JSON) that was written.
pub fn save_snapshot<C: Clock>(path: &Path, raw: &str, clock: &C) -> Result<String> {
    let contents = prepare_snapshot(raw, clock.now());
    write_report(path, &contents)?;
    Ok(contents)
}

/// Build a wall-clock merger from an optional config file
pub fn open_merger(config_path: Option<&Path>) -> Result<Merger<SystemClock>> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => MergeConfig::default(),
    };
    Ok(Merger::new(config, SystemClock)?)
}

/// Load a merge config from a JSON file; absent fields take their defaults
pub fn load_config(path: &Path) -> Result<MergeConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| StoreError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| StoreError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::Value;
    use ukmacro_core::FixedClock;

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
    }

    #[test]
    fn test_merge_report_creates_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("research_report.json");
        let merger = Merger::new(MergeConfig::default(), clock()).unwrap();

        merge_report(&merger, &path, "- Interest Rate: 5.25% (Jan-24)").unwrap();
        merge_report(&merger, &path, "- Interest Rate: 5.00% (Dec-23)").unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let rates = written["economic_indicators"]["interest_rate"]
            .as_array()
            .unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0]["month_period"], "Dec-23");
        assert_eq!(written["metadata"]["created_at"], "2024-02-01");
    }

    #[test]
    fn test_save_snapshot_overwrites() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("research_report.json");
        std::fs::write(&path, r#"{"old": true}"#).unwrap();

        save_snapshot(&path, "```json\n{\"fresh\": 1}\n```", &clock()).unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(written.get("old").is_none());
        assert_eq!(written["fresh"], 1);
        assert_eq!(written["metadata"]["generated_at"], "2024-02-01T12:00:00Z");
    }

    #[test]
    fn test_load_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"indicators": [{"label": "Unemployment", "key": "unemployment"}]}"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.indicators.len(), 1);
        assert_eq!(config.reports.len(), 2);
    }

    #[test]
    fn test_load_config_errors() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = load_config(&temp.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, StoreError::Config { .. }));

        let bad = temp.path().join("bad.json");
        std::fs::write(&bad, "{ nope").unwrap();
        assert!(load_config(&bad).is_err());
    }
}
