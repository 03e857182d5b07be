//! HTTP Basic authentication for the JIRA REST API.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Credentials for a JIRA server, reduced to the header they produce.
///
/// The password is encoded into the header as soon as it is supplied and is
/// never stored on its own.
#[derive(Clone)]
pub struct Auth {
    username: String,
    auth_header: String,
}

impl Auth {
    /// Build the credentials for `username` and `password`.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            auth_header: build_auth_header(username, password),
        }
    }

    /// The complete `Basic ...` value for the `Authorization` header.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

// The header is a reversible encoding of the password, so keep it out of logs.
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("username", &self.username)
            .field("auth_header", &"Basic <redacted>")
            .finish()
    }
}

/// Encode `username:password` in Base64 and prepend `Basic `.
fn build_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", BASE64.encode(credentials.as_bytes()))
}
