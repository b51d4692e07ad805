use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use ukmacro_core::period::format_date;
use ukmacro_core::schedule::schedule_entries;
use ukmacro_core::{publication_dates, Clock, ScheduleStatus, SystemClock};

fn load_dates(report: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    let contents = ukmacro_store::read_report(report)?;
    if contents.trim().is_empty() {
        anyhow::bail!("report {} is missing or empty", report.display());
    }
    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("report {} is not valid JSON: {}", report.display(), e))?;
    Ok(publication_dates(&value))
}

pub fn run_list(report: &Path) -> anyhow::Result<()> {
    let dates = load_dates(report)?;
    print!("{}", render_list(&dates, SystemClock.today()));
    Ok(())
}

pub fn run_status(report: &Path) -> anyhow::Result<()> {
    let dates = load_dates(report)?;
    print!("{}", render_status(&dates, SystemClock.today()));
    Ok(())
}

/// Print what is due today; returns whether anything is
pub fn run_due(report: &Path) -> anyhow::Result<bool> {
    let dates = load_dates(report)?;
    let today = SystemClock.today();
    let status = ScheduleStatus::from_dates(&dates, today);
    let due = status.is_due();

    if due {
        tracing::info!(due = ?status.due_today, "publications due today");
    } else {
        tracing::info!(today = %format_date(today), "no publications due today");
    }

    println!(
        "{}",
        serde_json::json!({
            "today": format_date(today),
            "due": status.due_today,
        })
    );

    Ok(due)
}

fn render_list(dates: &BTreeMap<String, String>, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nNext publication dates (today is {}):\n", format_date(today));
    let _ = writeln!(out, "  {:<35} {:<12} Note", "Indicator", "Date");
    let _ = writeln!(out, "  {} {} {}", "-".repeat(35), "-".repeat(12), "-".repeat(10));

    for entry in schedule_entries(dates, today) {
        let _ = writeln!(
            out,
            "  {:<35} {:<12} {}",
            entry.key,
            entry.date,
            entry.state.label()
        );
    }
    out.push('\n');
    out
}

fn render_status(dates: &BTreeMap<String, String>, today: NaiveDate) -> String {
    let status = ScheduleStatus::from_dates(dates, today);
    let mut out = String::new();
    let _ = writeln!(out, "\nScheduler status (today is {}):\n", format_date(today));

    if !status.overdue.is_empty() {
        let _ = writeln!(out, "  OVERDUE:");
        for entry in &status.overdue {
            let _ = writeln!(out, "    {:<35} {}", entry.key, entry.date);
        }
    }

    if !status.due_today.is_empty() {
        let _ = writeln!(out, "  DUE TODAY:");
        for key in &status.due_today {
            let _ = writeln!(out, "    {}", key);
        }
    }

    match &status.next_date {
        Some(next) => {
            let _ = writeln!(out, "\n  Next run: {}", next);
            let _ = writeln!(out, "  Indicators due: {}", status.next_keys.join(", "));
            if !status.later.is_empty() {
                let _ = writeln!(out, "\n  Further dates:");
                for entry in &status.later {
                    let _ = writeln!(out, "    {:<35} {}", entry.key, entry.date);
                }
            }
        }
        None if status.due_today.is_empty() => {
            let _ = writeln!(out, "  No future publication dates found in the report.");
        }
        None => {}
    }

    out.push('\n');
    out
}
