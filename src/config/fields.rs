//! Validation of the requested field list.

use super::{ConfigError, Result};

/// JIRA system field ids that can be requested from the search endpoint.
const SYSTEM_FIELDS: &[&str] = &[
    "aggregateprogress",
    "aggregatetimeestimate",
    "aggregatetimeoriginalestimate",
    "aggregatetimespent",
    "assignee",
    "attachment",
    "comment",
    "components",
    "created",
    "creator",
    "description",
    "duedate",
    "environment",
    "fixVersions",
    "issuelinks",
    "issuetype",
    "labels",
    "lastViewed",
    "parent",
    "priority",
    "progress",
    "project",
    "reporter",
    "resolution",
    "resolutiondate",
    "security",
    "status",
    "statuscategorychangedate",
    "subtasks",
    "summary",
    "timeestimate",
    "timeoriginalestimate",
    "timespent",
    "timetracking",
    "updated",
    "versions",
    "votes",
    "watches",
    "worklog",
    "workratio",
];

/// Selectors the search endpoint accepts in place of field ids.
const FIELD_SELECTORS: &[&str] = &["*all", "*navigable"];

const CUSTOM_FIELD_PREFIX: &str = "customfield_";

/// Split a comma-separated field list and check every name.
///
/// Whitespace around names and empty items are ignored, and repeated names
/// are kept once. An empty result means "all fields".
pub fn parse_fields(raw: &str) -> Result<Vec<String>> {
    let mut fields: Vec<String> = Vec::new();

    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !is_known_field(name) {
            return Err(ConfigError::UnknownField(name.to_string()));
        }
        if !fields.iter().any(|f| f == name) {
            fields.push(name.to_string());
        }
    }

    Ok(fields)
}

fn is_known_field(name: &str) -> bool {
    // A leading '-' excludes the field instead of including it.
    let name = name.strip_prefix('-').unwrap_or(name);

    if FIELD_SELECTORS.contains(&name) || SYSTEM_FIELDS.contains(&name) {
        return true;
    }

    match name.strip_prefix(CUSTOM_FIELD_PREFIX) {
        Some(id) => !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
