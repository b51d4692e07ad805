//! Next-publication dates read from the report's current-snapshot sections

use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::period::format_date;

/// Sections that carry `next_publication_date` entries
pub const SCHEDULE_SECTIONS: [&str; 2] = ["current_economic_indicators", "current_report_summaries"];

/// Collect `key -> next_publication_date` from the schedule sections
pub fn publication_dates(report: &Value) -> BTreeMap<String, String> {
    let mut dates = BTreeMap::new();
    for section in SCHEDULE_SECTIONS {
        let Some(entries) = report.get(section).and_then(Value::as_object) else {
            continue;
        };
        for (key, entry) in entries {
            if let Some(date) = entry.get("next_publication_date").and_then(Value::as_str) {
                dates.insert(key.clone(), date.to_string());
            }
        }
    }
    dates
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueState {
    Overdue,
    Today,
    Upcoming,
}

impl DueState {
    /// Compare ISO dates as strings, matching how they are stored
    pub fn classify(date: &str, today: &str) -> Self {
        match date.cmp(today) {
            std::cmp::Ordering::Less => DueState::Overdue,
            std::cmp::Ordering::Equal => DueState::Today,
            std::cmp::Ordering::Greater => DueState::Upcoming,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DueState::Overdue => "OVERDUE",
            DueState::Today => "TODAY",
            DueState::Upcoming => "",
        }
    }
}

/// A schedule entry with its due state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub key: String,
    pub date: String,
    pub state: DueState,
}

/// Entries ordered by date, then key
pub fn schedule_entries(dates: &BTreeMap<String, String>, today: NaiveDate) -> Vec<ScheduleEntry> {
    let today = format_date(today);
    let mut entries: Vec<ScheduleEntry> = dates
        .iter()
        .map(|(key, date)| ScheduleEntry {
            key: key.clone(),
            date: date.clone(),
            state: DueState::classify(date, &today),
        })
        .collect();
    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.key.cmp(&b.key)));
    entries
}

/// Summary of what is due and when the next run is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleStatus {
    pub overdue: Vec<ScheduleEntry>,
    pub due_today: Vec<String>,
    pub next_date: Option<String>,
    pub next_keys: Vec<String>,
    pub later: Vec<ScheduleEntry>,
}

impl ScheduleStatus {
    pub fn from_dates(dates: &BTreeMap<String, String>, today: NaiveDate) -> Self {
        let mut status = Self::default();
        let entries = schedule_entries(dates, today);

        status.next_date = entries
            .iter()
            .find(|e| e.state == DueState::Upcoming)
            .map(|e| e.date.clone());

        for entry in entries {
            match entry.state {
                DueState::Overdue => status.overdue.push(entry),
                DueState::Today => status.due_today.push(entry.key),
                DueState::Upcoming => {
                    if status.next_date.as_deref() == Some(entry.date.as_str()) {
                        status.next_keys.push(entry.key);
                    } else {
                        status.later.push(entry);
                    }
                }
            }
        }

        status
    }

    pub fn is_due(&self) -> bool {
        !self.due_today.is_empty()
    }
}
