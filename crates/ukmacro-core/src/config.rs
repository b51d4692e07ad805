//! Merge configuration and time source

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A bullet label and the series key it feeds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub label: String,
    pub key: String,
}

impl Label {
    pub fn new(label: &str, key: &str) -> Self {
        Self {
            label: label.to_string(),
            key: key.to_string(),
        }
    }
}

/// Merge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Indicator labels recognised in bullet text
    pub indicators: Vec<Label>,

    /// Report labels recognised in bullet text (without the trailing "Summary")
    pub reports: Vec<Label>,

    /// Summary texts that mean "nothing was found" (compared trimmed, lower-case)
    pub sentinels: Vec<String>,
}

impl MergeConfig {
    pub fn new() -> Self {
        Self {
            indicators: vec![
                Label::new("Interest Rate", "interest_rate"),
                Label::new("CPIH +/- MoM", "cpih_mom"),
                Label::new("GDP +/- MoM", "gdp_mom"),
            ],
            reports: vec![
                Label::new("Monetary Policy Report", "monetary_policy_report"),
                Label::new("Financial Stability Report", "financial_stability_report"),
            ],
            sentinels: vec!["data not found".to_string(), "data not found.".to_string()],
        }
    }

    pub fn indicator_key(&self, label: &str) -> Option<&str> {
        self.indicators
            .iter()
            .find(|l| l.label == label)
            .map(|l| l.key.as_str())
    }

    pub fn report_key(&self, label: &str) -> Option<&str> {
        self.reports
            .iter()
            .find(|l| l.label == label)
            .map(|l| l.key.as_str())
    }

    pub fn is_sentinel(&self, summary: &str) -> bool {
        let normalized = summary.trim().to_lowercase();
        self.sentinels.iter().any(|s| *s == normalized)
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of "now" for date stamping and fallbacks
pub trait Clock {
    /// Calendar date used for `created_at`/`updated_at` and period fallbacks
    fn today(&self) -> NaiveDate;

    /// Full timestamp used by snapshot writes
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock: local calendar date, UTC timestamps
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Midday UTC on the given date
    pub fn on(date: NaiveDate) -> Self {
        let instant = date.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc();
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.instant.date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }

    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
