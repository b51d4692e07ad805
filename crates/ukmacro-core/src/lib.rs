//! Time-series merge engine for the UK macro report

mod config;
mod error;
pub mod extract;
mod merger;
pub mod migrate;
pub mod period;
pub mod schedule;
pub mod series;
pub mod snapshot;
pub mod structured;
mod types;

pub use config::{Clock, FixedClock, Label, MergeConfig, SystemClock};
pub use error::MergeError;
pub use extract::{Bullet, ExtractReport, TextExtractor};
pub use merger::{Applied, Existing, MergeOutcome, Merger, Payload};
pub use migrate::migrate;
pub use period::{date_to_period, period_to_date};
pub use schedule::{publication_dates, DueState, ScheduleEntry, ScheduleStatus};
pub use series::{upsert, SeriesRecord, Upsert};
pub use snapshot::prepare_snapshot;
pub use structured::{merge_structured, StructuredReport};
pub use types::{Document, IndicatorRecord, IndicatorSeries, Metadata, SummaryRecord, SummarySeries};
