//! Report persistence: file I/O, atomic writes and path resolution

mod error;
mod io;
mod paths;
mod report;

pub use error::{Result, StoreError};
pub use io::{atomic_write, read_report, write_report};
pub use paths::{report_path, REPORT_FILE_NAME, REPORT_PATH_ENV};
pub use report::{load_config, merge_report, open_merger, save_snapshot};
