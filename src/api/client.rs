//! JIRA API client implementation.
//!
//! A blocking client for the REST API v2 search endpoint. Requests are issued
//! one at a time on the calling thread; nothing is retried.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{header, StatusCode};
use tracing::{debug, info, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::planner::{SearchQuery, SearchRequest, WINDOW};
use super::stream::{IssueStream, PageSource};
use super::types::SearchResult;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The JIRA API client.
#[derive(Debug)]
pub struct JiraClient {
    /// The HTTP client.
    client: Client,
    /// The base URL for the JIRA instance, without trailing slash.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
}

impl JiraClient {
    /// Create a client for `base_url` authenticating as `username`.
    ///
    /// The password is folded into the Authorization header here and not
    /// kept anywhere else.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_credentials(
        base_url: &str,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let auth = Auth::new(username, password);
        let client = Self::build_http_client(timeout)?;
        let base_url = normalize_base_url(base_url);

        info!(base_url = %base_url, username = %auth.username(), "JIRA client created");

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    fn build_http_client(timeout: Duration) -> Result<Client> {
        Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Client)
    }

    /// Start a query against this client's server.
    pub fn query(&self, jql: &str, fields: Vec<String>) -> SearchQuery {
        SearchQuery::new(&self.base_url, jql, fields)
    }

    /// Ask the server how many issues match `query`.
    #[instrument(skip(self, query), fields(jql = %query.jql()))]
    pub fn count(&self, query: &SearchQuery) -> Result<u32> {
        let total = self.search(&query.probe())?.total;
        debug!(total, "Counted matching issues");
        Ok(total)
    }

    /// Count the matches, plan the windows, and return a lazy stream over
    /// every matching issue.
    ///
    /// Only the probe request is made here. Pages are fetched as the stream
    /// is consumed.
    pub fn issues(&self, query: &SearchQuery) -> Result<IssueStream<&Self>> {
        let total = self.count(query)?;
        let pages = query.pages(total, WINDOW);
        info!(total, pages = pages.len(), "Planned export");
        Ok(IssueStream::new(self, pages))
    }

    /// Execute one search request.
    #[instrument(skip(self, request), fields(start_at = request.start_at(), max_results = request.max_results()))]
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult> {
        let url = request.url();

        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        if status != StatusCode::OK {
            let err = ApiError::Server {
                url: url.to_string(),
                status,
                body,
            };
            match err.jira_messages() {
                Some(messages) => warn!(%status, %messages, "Search request rejected"),
                None => warn!(%status, "Search request rejected"),
            }
            return Err(err);
        }

        let result: SearchResult = serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if result.issues.is_none() && !request.is_probe() {
            return Err(ApiError::Decode {
                url: url.to_string(),
                message: "missing field `issues`".to_string(),
            });
        }

        Ok(result)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PageSource for JiraClient {
    fn fetch(&self, request: &SearchRequest) -> Result<SearchResult> {
        self.search(request)
    }
}

/// Remove trailing slashes, warning when credentials would go out in clear
/// text to a non-local host.
///
/// This is the only place the server URL is normalised; search URLs are
/// built by appending to the result.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. Credentials are sent in clear text.", url);
    }

    url.to_string()
}
