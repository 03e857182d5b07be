//! Search request construction and pagination planning.
//!
//! A search is planned in two steps: a probe request with `maxResults=0`
//! reports how many issues match, then the range `[0, total)` is cut into
//! fixed windows, one request per window.

use std::num::NonZeroU32;

/// Page size used for every windowed search request.
pub const WINDOW: NonZeroU32 = match NonZeroU32::new(100) {
    Some(window) => window,
    None => panic!("window must be non-zero"),
};

/// A single request against the search endpoint.
///
/// Immutable once built; the URL already carries every parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    url: String,
    start_at: u32,
    max_results: u32,
}

impl SearchRequest {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn start_at(&self) -> u32 {
        self.start_at
    }

    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    /// Whether this is the zero-result count request.
    pub fn is_probe(&self) -> bool {
        self.max_results == 0
    }
}

/// The fixed parts of a search: where, what, and which fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    base_url: String,
    jql: String,
    fields: Vec<String>,
}

impl SearchQuery {
    /// Create a query. `base_url` is used as given and must not end in a
    /// slash; an empty `fields` list asks the server for all fields.
    pub fn new(base_url: &str, jql: &str, fields: Vec<String>) -> Self {
        Self {
            base_url: base_url.to_string(),
            jql: jql.to_string(),
            fields,
        }
    }

    pub fn jql(&self) -> &str {
        &self.jql
    }

    /// Build the request for one window of results.
    ///
    /// The JQL is percent-encoded; field names are joined as given.
    pub fn request(&self, start_at: u32, max_results: u32) -> SearchRequest {
        let url = format!(
            "{}/rest/api/2/search?jql={}&fields={}&startAt={}&maxResults={}",
            self.base_url,
            urlencoding::encode(&self.jql),
            self.fields.join(","),
            start_at,
            max_results
        );

        SearchRequest {
            url,
            start_at,
            max_results,
        }
    }

    /// The request that only asks for the total count.
    pub fn probe(&self) -> SearchRequest {
        self.request(0, 0)
    }

    /// Every windowed request needed to cover `total` results, in order.
    pub fn pages(&self, total: u32, window: NonZeroU32) -> Vec<SearchRequest> {
        window_offsets(total, window)
            .map(|start_at| self.request(start_at, window.get()))
            .collect()
    }
}

/// Offsets `0, W, 2W, ...` strictly below `total`.
pub fn window_offsets(total: u32, window: NonZeroU32) -> impl Iterator<Item = u32> {
    (0..total).step_by(window.get() as usize)
}
