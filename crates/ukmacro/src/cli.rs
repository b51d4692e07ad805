use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ukmacro")]
#[command(version)]
#[command(about = "Maintains the UK macroeconomic research report")]
pub struct Cli {
    /// Report file (defaults to $UKMACRO_REPORT, then ./research_report.json)
    #[arg(long, global = true)]
    pub report: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge new data (JSON or bullet text) into the report
    Merge {
        /// Payload file (reads stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Label vocabulary config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Overwrite the report with a freshly generated snapshot
    Save {
        /// Snapshot file, optionally markdown-fenced (reads stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Inspect next publication dates
    Schedule {
        #[command(subcommand)]
        action: Option<ScheduleAction>,
    },

    /// Print the ISO date for a period token such as Jan-24
    Period { token: String },

    /// Print version information
    Version,
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show all next publication dates
    List,
    /// Show the next scheduled run
    Status,
    /// Print what is due today; exits 1 when nothing is
    Due,
}
