//! Centralized error type for jira-export.
//!
//! Every failure ends the run. `main` prints the message of the error that
//! reached it and exits with status 1.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors. Raised before any request is made.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Errors talking to the JIRA server.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Writing the output failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// The process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
