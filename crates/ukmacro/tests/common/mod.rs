#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::Value;
use ukmacro_core::{FixedClock, MergeConfig, Merger};

pub fn clock_on(year: i32, month: u32, day: u32) -> FixedClock {
    FixedClock::on(NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

pub fn sample_merger() -> Merger<FixedClock> {
    Merger::new(MergeConfig::default(), clock_on(2024, 2, 15)).unwrap()
}

pub fn parse(json: &str) -> Value {
    serde_json::from_str(json).expect("merge output must be valid JSON")
}

pub fn series<'a>(doc: &'a Value, section: &str, key: &str) -> &'a Vec<Value> {
    doc[section][key]
        .as_array()
        .unwrap_or_else(|| panic!("{section}.{key} is not an array"))
}

/// Assert every series in both sections is ordered by its date field
pub fn assert_chronological(doc: &Value) {
    for (section, field) in [
        ("economic_indicators", "date_published"),
        ("report_summaries", "report_date"),
    ] {
        let Some(all) = doc[section].as_object() else {
            continue;
        };
        for (key, records) in all {
            let dates: Vec<&str> = records
                .as_array()
                .unwrap()
                .iter()
                .map(|r| r[field].as_str().unwrap_or("1900-01-01"))
                .collect();
            let mut sorted = dates.clone();
            sorted.sort();
            assert_eq!(dates, sorted, "{section}.{key} is out of order");
        }
    }
}
