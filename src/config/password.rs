//! Password file handling.
//!
//! The password lives in a file of its own, readable only by its owner. Only
//! the first line is used.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ConfigError, Result};

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Check that `path` is a regular file nobody but its owner can access.
pub fn check_password_file(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|source| ConfigError::PasswordFile {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_file() {
        return Err(ConfigError::ValidationError(format!(
            "password file '{}' is not a regular file",
            path.display()
        )));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            return Err(ConfigError::InsecurePasswordFile {
                path: path.to_path_buf(),
                mode,
            });
        }
    }

    Ok(())
}

/// Read the password from the first line of `path`.
///
/// The line terminator (`\n` or `\r\n`) is not part of the password.
pub fn read_password(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|source| ConfigError::PasswordFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|source| ConfigError::PasswordFile {
            path: path.to_path_buf(),
            source,
        })?;

    let password = line.trim_end_matches(['\n', '\r']);
    if password.is_empty() {
        return Err(ConfigError::EmptyPassword(path.to_path_buf()));
    }

    debug!(path = %path.display(), "Read password file");
    Ok(password.to_string())
}
