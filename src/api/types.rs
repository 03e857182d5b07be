//! JIRA API response types.
//!
//! These types model the parts of the REST API v2 search response that the
//! export needs. Field contents are passed through untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One page of search results.
///
/// Returned by `GET /rest/api/2/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The index of the first result.
    #[serde(default)]
    pub start_at: u32,
    /// Maximum results requested.
    #[serde(default)]
    pub max_results: u32,
    /// Total number of matching issues.
    pub total: u32,
    /// The issues on this page, in server order. Only a count request may
    /// come back without them.
    #[serde(default)]
    pub issues: Option<Vec<Issue>>,
}

/// A JIRA issue as it appears in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// The numeric issue ID. JIRA sends it as a string.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    /// Canonical REST URL of the issue.
    #[serde(rename = "self")]
    pub self_url: String,
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    /// The requested fields, exactly as the server returned them.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid issue id '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_result_deserialize() {
        let result: SearchResult = serde_json::from_value(json!({
            "expand": "schema,names",
            "startAt": 0,
            "maxResults": 100,
            "total": 2,
            "issues": [
                {
                    "expand": "operations,versionedRepresentations,editmeta,changelog,renderedFields",
                    "id": "120937",
                    "self": "https://jira.example.com/rest/api/2/issue/120937",
                    "key": "PROJ-16598",
                    "fields": {
                        "summary": "Support validation of encrypted id_tokens",
                        "components": [
                            {"self": "https://jira.example.com/rest/api/2/component/11130", "id": "11130", "name": "OpenID Connect"}
                        ]
                    }
                },
                {
                    "id": "120938",
                    "self": "https://jira.example.com/rest/api/2/issue/120938",
                    "key": "PROJ-16599",
                    "fields": {"summary": "Second"}
                }
            ]
        }))
        .unwrap();

        assert_eq!(result.total, 2);
        let issues = result.issues.unwrap();
        assert_eq!(issues.len(), 2);

        let issue = &issues[0];
        assert_eq!(issue.id, 120937);
        assert_eq!(issue.key, "PROJ-16598");
        assert_eq!(
            issue.self_url,
            "https://jira.example.com/rest/api/2/issue/120937"
        );
        assert_eq!(
            issue.fields.get("summary"),
            Some(&json!("Support validation of encrypted id_tokens"))
        );
        assert_eq!(issue.fields["components"][0]["name"], "OpenID Connect");
    }

    #[test]
    fn test_count_response_without_issues() {
        let result: SearchResult =
            serde_json::from_value(json!({"startAt": 0, "maxResults": 0, "total": 237})).unwrap();

        assert_eq!(result.total, 237);
        assert!(result.issues.is_none());
    }

    #[test]
    fn test_empty_issues_kept_distinct_from_missing() {
        let result: SearchResult =
            serde_json::from_value(json!({"total": 0, "issues": []})).unwrap();
        assert_eq!(result.issues, Some(Vec::new()));
    }

    #[test]
    fn test_missing_total_rejected() {
        let result = serde_json::from_value::<SearchResult>(json!({"issues": []}));
        assert!(result.is_err());
    }

    #[test]
    fn test_numeric_id_accepted() {
        let issue: Issue = serde_json::from_value(json!({
            "id": 7,
            "self": "https://jira.example.com/rest/api/2/issue/7",
            "key": "PROJ-7"
        }))
        .unwrap();

        assert_eq!(issue.id, 7);
        assert!(issue.fields.is_empty());
    }

    #[test]
    fn test_non_numeric_id_rejected() {
        let result = serde_json::from_value::<Issue>(json!({
            "id": "abc",
            "self": "https://jira.example.com/rest/api/2/issue/abc",
            "key": "PROJ-1"
        }));

        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid issue id 'abc'"));
    }

    #[test]
    fn test_issue_serializes_with_numeric_id() {
        let issue = Issue {
            id: 120937,
            self_url: "https://jira.example.com/rest/api/2/issue/120937".to_string(),
            key: "PROJ-16598".to_string(),
            fields: json!({"summary": "Hello"}).as_object().unwrap().clone(),
        };

        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 120937,
                "self": "https://jira.example.com/rest/api/2/issue/120937",
                "key": "PROJ-16598",
                "fields": {"summary": "Hello"}
            })
        );
    }
}
