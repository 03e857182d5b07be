//! Logging configuration using the tracing ecosystem.
//!
//! Standard output carries the exported issues, so log records never go
//! there. By default they are written to standard error; with a log
//! directory they go to a daily rotating file instead.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "jira_export=warn";

/// Log level used with `--verbose` if RUST_LOG is not set.
const VERBOSE_LOG_FILTER: &str = "jira_export=debug,warn";

const LOG_FILE_PREFIX: &str = "jira-export.log";

/// Where log records go and how many of them.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Lower the default level to debug.
    pub verbose: bool,
    /// Write to a daily rotating file in this directory instead of stderr.
    pub log_dir: Option<PathBuf>,
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the level picked from `options`.
///
/// # Errors
///
/// Returns an error if:
/// - The log directory cannot be created
/// - The tracing subscriber cannot be set
pub fn init(options: &LogOptions) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(options.verbose)));

    match &options.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

            let subscriber = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter);
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            let subscriber = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true),
                )
                .with(filter);
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "jira-export starting up");
    if let Some(log_dir) = &options.log_dir {
        tracing::debug!(log_dir = %log_dir.display(), "Log directory");
    }

    Ok(())
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}
