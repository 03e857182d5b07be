//! The optional config file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ConfigError, Profile, Result};

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// The profile used when none is named on the command line.
    pub default_profile: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Named profiles.
    pub profiles: BTreeMap<String, Profile>,
}

impl Settings {
    /// Where the config file lives when no path is given.
    ///
    /// - Linux: `~/.config/jira-export/config.toml`
    /// - macOS: `~/Library/Application Support/jira-export/config.toml`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\jira-export\config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("jira-export").join("config.toml"))
    }

    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded config file");
        Ok(settings)
    }

    /// Load an explicitly named file, or the default one if it exists.
    ///
    /// A missing default file yields empty settings; a missing named file is
    /// an error.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };

        match Self::load(&path) {
            Err(ConfigError::ReadError { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// The profile to use: `name` if given, else `default_profile`, else none.
    pub fn profile(&self, name: Option<&str>) -> Result<Option<&Profile>> {
        match name.or(self.default_profile.as_deref()) {
            Some(name) => self
                .profiles
                .get(name)
                .map(Some)
                .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string())),
            None => Ok(None),
        }
    }
}
