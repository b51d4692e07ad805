//! Report location resolution

use std::path::{Path, PathBuf};

/// Report file name used when nothing else is configured
pub const REPORT_FILE_NAME: &str = "research_report.json";

/// Environment variable that overrides the default report location
pub const REPORT_PATH_ENV: &str = "UKMACRO_REPORT";

/// Resolve the report path: explicit argument, then `UKMACRO_REPORT`, then
/// `research_report.json` in the working directory
pub fn report_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var_os(REPORT_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(REPORT_FILE_NAME),
    }
}
