//! Bullet-text extraction
//!
//! Recognises two line shapes:
//!
//! ```text
//! - Interest Rate: 5.25% (Jan-24)
//! - Monetary Policy Report Summary: Bank Rate held at 5.25% (Feb-24)
//! ```
//!
//! Only configured labels are accepted. Anything else is ignored.

use chrono::NaiveDate;
use regex::Regex;

use crate::config::{Label, MergeConfig};
use crate::error::MergeError;
use crate::period::{format_date, period_to_date};
use crate::series::upsert;
use crate::types::{Document, IndicatorRecord, SummaryRecord};

/// A recognised bullet line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bullet {
    Indicator {
        key: String,
        value: String,
        period: String,
    },
    Summary {
        key: String,
        summary: String,
        period: String,
    },
    /// A summary line whose text is a "data not found" sentinel
    Missing { key: String },
}

/// Counts from one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub indicators: usize,
    pub summaries: usize,
    pub missing: usize,
    pub ignored: usize,
}

/// Line parser built from the configured label vocabulary
#[derive(Debug, Clone)]
pub struct TextExtractor {
    indicator_re: Option<Regex>,
    summary_re: Option<Regex>,
    config: MergeConfig,
}

impl TextExtractor {
    pub fn new(config: &MergeConfig) -> Result<Self, MergeError> {
        let indicator_re = label_pattern(&config.indicators)
            .map(|labels| Regex::new(&format!(r"^-\s*({labels}):\s*(.*?)\s*\((\w{{3}}-\d{{2}})\)")))
            .transpose()?;
        let summary_re = label_pattern(&config.reports)
            .map(|labels| {
                Regex::new(&format!(
                    r"^-\s*({labels})\s*Summary:\s*(.*?)\s*\((\w{{3}}-\d{{2}})\)"
                ))
            })
            .transpose()?;

        Ok(Self {
            indicator_re,
            summary_re,
            config: config.clone(),
        })
    }

    /// Parse a single (already trimmed) line
    pub fn parse_line(&self, line: &str) -> Option<Bullet> {
        if let Some(cap) = self.indicator_re.as_ref().and_then(|re| re.captures(line)) {
            let key = self.config.indicator_key(&cap[1])?;
            return Some(Bullet::Indicator {
                key: key.to_string(),
                value: cap[2].trim().to_string(),
                period: cap[3].to_string(),
            });
        }

        if let Some(cap) = self.summary_re.as_ref().and_then(|re| re.captures(line)) {
            let key = self.config.report_key(&cap[1])?.to_string();
            let summary = cap[2].trim();
            if self.config.is_sentinel(summary) {
                return Some(Bullet::Missing { key });
            }
            return Some(Bullet::Summary {
                key,
                summary: summary.to_string(),
                period: cap[3].to_string(),
            });
        }

        None
    }

    /// Upsert every recognised line of `text` into `doc`
    pub fn extract(&self, doc: &mut Document, text: &str, today: NaiveDate) -> ExtractReport {
        let mut report = ExtractReport::default();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match self.parse_line(line) {
                Some(Bullet::Indicator { key, value, period }) => {
                    let date = format_date(period_to_date(&period, today));
                    let series = doc.economic_indicators.entry(key).or_default();
                    upsert(series, IndicatorRecord::new(&value, &date, &period));
                    report.indicators += 1;
                }
                Some(Bullet::Summary {
                    key,
                    summary,
                    period,
                }) => {
                    let date = format_date(period_to_date(&period, today));
                    let series = doc.report_summaries.entry(key).or_default();
                    upsert(series, SummaryRecord::new(&summary, &date, &period));
                    report.summaries += 1;
                }
                Some(Bullet::Missing { key }) => {
                    tracing::debug!(report = %key, "skipping summary marked as not found");
                    report.missing += 1;
                }
                None => {
                    tracing::debug!(line, "ignoring unrecognised line");
                    report.ignored += 1;
                }
            }
        }

        report
    }
}

/// Regex alternation of the escaped labels, or `None` when there are none
fn label_pattern(labels: &[Label]) -> Option<String> {
    if labels.is_empty() {
        return None;
    }
    Some(
        labels
            .iter()
            .map(|l| regex::escape(&l.label))
            .collect::<Vec<_>>()
            .join("|"),
    )
}
