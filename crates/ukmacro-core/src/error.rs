//! Errors raised inside the merge engine
//!
//! `Merger::merge` absorbs all of these and falls back to a valid document.
//! They only surface through `Merger::try_merge`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    /// Existing report is valid JSON but not a report document
    #[error("existing report has an unexpected shape: {0}")]
    Document(#[source] serde_json::Error),

    /// Label vocabulary produced an invalid pattern
    #[error("invalid label pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to serialize report: {0}")]
    Serialize(#[source] serde_json::Error),
}
