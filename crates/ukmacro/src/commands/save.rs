use std::path::Path;

use ukmacro_core::SystemClock;

pub fn run(report: &Path, input: Option<&Path>) -> anyhow::Result<()> {
    let raw = super::read_input(input)?;
    if raw.trim().is_empty() {
        anyhow::bail!("snapshot is empty; refusing to overwrite {}", report.display());
    }

    ukmacro_store::save_snapshot(report, &raw, &SystemClock)?;
    println!("Saved snapshot to {}", report.display());
    Ok(())
}
