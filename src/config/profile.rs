//! Export profile configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One set of export options.
///
/// Profiles are read from the config file, and the command line produces one
/// as well. Every value is optional; a later stage decides what is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    /// The JIRA server URL (e.g., "https://jira.example.com").
    pub server: Option<String>,

    /// The user to authenticate as.
    pub username: Option<String>,

    /// File whose first line is the password.
    pub password_file: Option<PathBuf>,

    /// The JQL statement to export.
    pub jql: Option<String>,

    /// Comma-separated field names; absent or empty means all fields.
    pub fields: Option<String>,
}

impl Profile {
    /// Fill every value missing from `self` with the one from `fallback`.
    pub fn or(self, fallback: &Profile) -> Profile {
        Profile {
            server: self.server.or_else(|| fallback.server.clone()),
            username: self.username.or_else(|| fallback.username.clone()),
            password_file: self
                .password_file
                .or_else(|| fallback.password_file.clone()),
            jql: self.jql.or_else(|| fallback.jql.clone()),
            fields: self.fields.or_else(|| fallback.fields.clone()),
        }
    }
}
