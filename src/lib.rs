//! jira-export - Export the JIRA issues matching a JQL query as JSON lines.
//!
//! The export counts the matching issues with a zero-result probe, splits the
//! result set into fixed windows, and fetches those windows one at a time as
//! the issues are written out.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
