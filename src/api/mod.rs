//! JIRA API client and types.
//!
//! This module plans a paginated JQL search and streams the matching issues
//! from the REST API.

mod auth;
mod client;
pub mod error;
mod planner;
mod stream;
pub mod types;

pub use auth::Auth;
pub use client::{JiraClient, DEFAULT_TIMEOUT_SECS};
pub use error::ApiError;
pub use planner::{window_offsets, SearchQuery, SearchRequest, WINDOW};
pub use stream::{IssueStream, PageSource};
pub use types::{Issue, SearchResult};
