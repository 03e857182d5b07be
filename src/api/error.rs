//! API error types for the JIRA client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the JIRA search endpoint.
///
/// None of these are retried; each one ends the export.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response (DNS, refused, timeout...).
    #[error("Failed to connect: {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with anything other than 200 OK.
    #[error("Could not perform query {url} ({status}):\n{body}")]
    Server {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// A 200 response whose body is not a search results envelope.
    #[error("Invalid search response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// The HTTP status, for errors that carry one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `errorMessages` and `errors` JIRA puts in a failure body, joined
    /// into one line. `None` when the body is not in that shape.
    pub fn jira_messages(&self) -> Option<String> {
        match self {
            ApiError::Server { body, .. } => jira_error_messages(body),
            _ => None,
        }
    }
}

fn jira_error_messages(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;

    let mut messages: Vec<String> = json
        .get("errorMessages")
        .and_then(|m| m.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if let Some(obj) = json.get("errors").and_then(|e| e.as_object()) {
        messages.extend(obj.iter().map(|(k, v)| match v.as_str() {
            Some(s) => format!("{}: {}", k, s),
            None => format!("{}: {}", k, v),
        }));
    }

    if messages.is_empty() {
        None
    } else {
        Some(messages.join(", "))
    }
}
