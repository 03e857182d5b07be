//! Lazy, page-at-a-time issue iteration.

use std::vec;

use tracing::debug;

use super::error::Result;
use super::planner::SearchRequest;
use super::types::{Issue, SearchResult};

/// Something that can execute a single search request.
pub trait PageSource {
    fn fetch(&self, request: &SearchRequest) -> Result<SearchResult>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn fetch(&self, request: &SearchRequest) -> Result<SearchResult> {
        (**self).fetch(request)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Streaming,
    Exhausted,
    Failed,
}

/// Forward-only iterator over the issues of a planned search.
///
/// A page is fetched only once every issue of the previous page has been
/// handed out. The first error ends the stream: it is yielded once and no
/// further requests are made.
pub struct IssueStream<S> {
    source: S,
    requests: vec::IntoIter<SearchRequest>,
    current: vec::IntoIter<Issue>,
    pages_fetched: usize,
    state: State,
}

impl<S: PageSource> IssueStream<S> {
    pub fn new(source: S, requests: Vec<SearchRequest>) -> Self {
        Self {
            source,
            requests: requests.into_iter(),
            current: Vec::new().into_iter(),
            pages_fetched: 0,
            state: State::Streaming,
        }
    }

    /// How many pages have been requested so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Requests not yet issued.
    pub fn pages_remaining(&self) -> usize {
        self.requests.len()
    }
}

impl<S: PageSource> Iterator for IssueStream<S> {
    type Item = Result<Issue>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state != State::Streaming {
                return None;
            }

            if let Some(issue) = self.current.next() {
                return Some(Ok(issue));
            }

            let Some(request) = self.requests.next() else {
                self.state = State::Exhausted;
                return None;
            };

            self.pages_fetched += 1;
            debug!(
                page = self.pages_fetched,
                remaining = self.pages_remaining(),
                start_at = request.start_at(),
                "Fetching page"
            );

            match self.source.fetch(&request) {
                Ok(page) => {
                    let issues = page.issues.unwrap_or_default();
                    debug!(issues = issues.len(), total = page.total, "Page received");
                    self.current = issues.into_iter();
                }
                Err(e) => {
                    self.state = State::Failed;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<S: PageSource> std::iter::FusedIterator for IssueStream<S> {}
