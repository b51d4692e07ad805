pub mod merge;
pub mod period;
pub mod save;
pub mod schedule;
pub mod version;

use std::io::Read;
use std::path::Path;

/// Read a payload from `input`, or from stdin when no file is given
pub fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read input {}: {}", path.display(), e)),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
