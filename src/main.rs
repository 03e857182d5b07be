//! jira-export - Export the JIRA issues matching a JQL query as JSON lines.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use jira_export::app;
use jira_export::cli::Cli;
use jira_export::logging;

fn main() -> ExitCode {
    // Help and version output count as failures too.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&cli.log_options()) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match app::run(&cli, io::stdout().lock()) {
        Ok(outcome) => {
            tracing::debug!(?outcome, "jira-export shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Export failed");
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
