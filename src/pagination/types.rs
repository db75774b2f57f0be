//! Pagination types and traits
//!
//! Defines the listing-source abstraction the traversal is driven by.

use crate::error::Result;
use crate::types::{Batch, ContinuationRequest};
use async_trait::async_trait;
use serde_json::Value;

/// One extracted page: its items and the token for the next page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Item references in server order
    pub items: Batch,
    /// Server-issued continuation token, if more pages exist
    pub continuation: Option<String>,
}

impl Page {
    /// Create a page with no continuation
    pub fn last(items: Batch) -> Self {
        Self {
            items,
            continuation: None,
        }
    }

    /// Create a page followed by another one
    pub fn with_continuation(items: Batch, token: impl Into<String>) -> Self {
        Self {
            items,
            continuation: Some(token.into()),
        }
    }

    /// Check if another page follows
    pub fn has_next(&self) -> bool {
        self.continuation.is_some()
    }
}

/// Result of checking the stop item against a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopResult {
    /// Stop item absent, keep paginating
    Continue,
    /// Stop item found at this index; truncate and finish
    Stop(usize),
}

/// Look for `stop_item` in `batch`
///
/// Only the given batch is inspected; earlier batches are never revisited.
pub fn check_stop(batch: &[String], stop_item: Option<&str>) -> StopResult {
    stop_item
        .and_then(|stop| batch.iter().position(|item| item == stop))
        .map_or(StopResult::Continue, StopResult::Stop)
}

/// Tracks progress during a traversal
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages processed so far
    pub pages: u32,
    /// Items yielded so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Record one processed page
    pub fn next_page(&mut self) {
        self.pages += 1;
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }
}

/// A paginated listing: how to read a page, and how to get the next one
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Pull the items and continuation token out of a page's JSON
    fn extract_page(&self, page: &Value) -> Result<Page>;

    /// Turn a continuation token into a request. Must not perform I/O.
    fn build_continuation(&self, token: &str) -> Result<ContinuationRequest>;

    /// Issue a continuation request and parse the JSON response
    async fn fetch_continuation(&self, request: ContinuationRequest) -> Result<Value>;
}

#[async_trait]
impl<'a, T: ListingSource + ?Sized> ListingSource for &'a T {
    fn extract_page(&self, page: &Value) -> Result<Page> {
        (**self).extract_page(page)
    }

    fn build_continuation(&self, token: &str) -> Result<ContinuationRequest> {
        (**self).build_continuation(token)
    }

    async fn fetch_continuation(&self, request: ContinuationRequest) -> Result<Value> {
        (**self).fetch_continuation(request).await
    }
}
