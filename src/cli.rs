//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Profile;
use crate::logging::LogOptions;

/// Export the JIRA issues matching a JQL query as JSON, one issue per line.
///
/// Options not given here are taken from the selected profile in the config
/// file.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "jira-export", version)]
pub struct Cli {
    /// Username to authenticate to JIRA with.
    #[arg(short, long)]
    pub username: Option<String>,

    /// The path of the file containing the JIRA password. Must be readable
    /// only by its owner.
    #[arg(short, long, visible_alias = "passwordFile", value_name = "FILE")]
    pub password_file: Option<PathBuf>,

    /// The server URL of the JIRA server.
    #[arg(short, long = "server", visible_alias = "serverURL", value_name = "URL")]
    pub server: Option<String>,

    /// The JQL statement to query the server with.
    /// See https://www.atlassian.com/software/jira/guides/jql/overview for
    /// more information.
    #[arg(short, long)]
    pub jql: Option<String>,

    /// Comma-separated fields to extract from each issue. All fields are
    /// extracted if this is not specified.
    #[arg(short, long)]
    pub fields: Option<String>,

    /// Profile to read from the config file.
    #[arg(short = 'P', long)]
    pub profile: Option<String>,

    /// Config file to use instead of the default location.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log debug information to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a daily rotating file in this directory.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// The export options given on the command line.
    pub fn overrides(&self) -> Profile {
        Profile {
            server: self.server.clone(),
            username: self.username.clone(),
            password_file: self.password_file.clone(),
            jql: self.jql.clone(),
            fields: self.fields.clone(),
        }
    }

    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            verbose: self.verbose,
            log_dir: self.log_dir.clone(),
        }
    }
}
