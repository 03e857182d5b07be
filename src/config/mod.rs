//! Configuration for an export run.
//!
//! Values come from the command line first, then from the selected profile
//! in the config file. Everything is validated here, before any request is
//! made.

mod fields;
mod password;
mod profile;
mod settings;

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::api::DEFAULT_TIMEOUT_SECS;

pub use fields::parse_fields;
pub use password::{check_password_file, expand_home, read_password};
pub use profile::Profile;
pub use settings::Settings;

/// Errors in the export configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Could not read config file '{}': {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("Invalid config file '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The requested profile does not exist in the config file.
    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),

    /// A required value was given neither on the command line nor in the
    /// profile.
    #[error("Missing required option {flag} (or `{key}` in the config profile)")]
    Missing {
        key: &'static str,
        flag: &'static str,
    },

    /// The server URL is not an absolute http(s) URL.
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },

    /// The password file could not be read.
    #[error("Could not read password file '{}': {source}", .path.display())]
    PasswordFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The password file can be accessed by other users.
    #[error("Password file '{}' must be readable only by its owner (mode is {mode:o})", .path.display())]
    InsecurePasswordFile { path: PathBuf, mode: u32 },

    /// The first line of the password file is empty.
    #[error("Password file '{}' is empty", .0.display())]
    EmptyPassword(PathBuf),

    /// A requested field is not a JIRA field.
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    /// Any other invalid value.
    #[error("{0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A fully validated export configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server base URL without trailing slash.
    pub server: String,
    pub username: String,
    /// Password file, already checked for existence and permissions.
    pub password_file: PathBuf,
    pub jql: String,
    /// Requested fields; empty means all fields.
    pub fields: Vec<String>,
    pub timeout: Duration,
}

impl Config {
    /// Combine command-line values with the config file and validate them.
    ///
    /// `profile_name` selects a profile from `settings`; without it the
    /// file's `default_profile` is used, if any. `timeout_secs` overrides the
    /// file's timeout.
    pub fn resolve(
        overrides: Profile,
        settings: &Settings,
        profile_name: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let merged = match settings.profile(profile_name)? {
            Some(profile) => overrides.or(profile),
            None => overrides,
        };

        let server = validate_server(&required(merged.server, "server", "--server")?)?;
        let username = required(merged.username, "username", "--username")?;
        let jql = required(merged.jql, "jql", "--jql")?;
        let password_file = expand_home(&required(
            merged.password_file,
            "password_file",
            "--password-file",
        )?);
        check_password_file(&password_file)?;
        let fields = parse_fields(merged.fields.as_deref().unwrap_or_default())?;

        let timeout_secs = timeout_secs
            .or(settings.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        debug!(%server, %username, fields = fields.len(), timeout_secs, "Resolved configuration");

        Ok(Self {
            server,
            username,
            password_file,
            jql,
            fields,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Read the password from the configured file.
    pub fn read_password(&self) -> Result<String> {
        read_password(&self.password_file)
    }
}

fn required<T>(value: Option<T>, key: &'static str, flag: &'static str) -> Result<T> {
    value.ok_or(ConfigError::Missing { key, flag })
}

/// Check that `url` is an absolute http(s) URL with a host.
///
/// Surrounding whitespace is dropped; trailing slashes are left for the
/// client to remove.
fn validate_server(url: &str) -> Result<String> {
    let trimmed = url.trim();

    let invalid = |reason: &str| ConfigError::InvalidServerUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = reqwest::Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("URL must start with http:// or https://"));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("URL has no host"));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("URL must not have a query or fragment"));
    }

    Ok(trimmed.to_string())
}
