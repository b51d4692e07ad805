mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands, ScheduleAction};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let report = ukmacro_store::report_path(cli.report.as_deref());

    match cli.command {
        Commands::Merge { input, config } => {
            commands::merge::run(&report, input.as_deref(), config.as_deref())?
        }
        Commands::Save { input } => commands::save::run(&report, input.as_deref())?,
        Commands::Schedule { action } => match action {
            Some(ScheduleAction::List) | None => commands::schedule::run_list(&report)?,
            Some(ScheduleAction::Status) => commands::schedule::run_status(&report)?,
            Some(ScheduleAction::Due) => {
                // Non-zero when nothing is due, so cron can gate the run on it
                if !commands::schedule::run_due(&report)? {
                    return Ok(ExitCode::FAILURE);
                }
            }
        },
        Commands::Period { token } => commands::period::run(&token)?,
        Commands::Version => commands::version::run()?,
    }
    Ok(ExitCode::SUCCESS)
}
