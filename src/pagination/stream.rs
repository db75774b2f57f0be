//! Continuation-following traversal
//!
//! Turns a [`ListingSource`] and a first page into a lazy stream of batches.

use super::types::{check_stop, ListingSource, PaginationState, StopResult};
use crate::error::Result;
use crate::types::Batch;
use futures::stream::{self, Stream};
use serde_json::Value;
use tracing::{debug, info};

/// What the traversal does on the next poll
#[derive(Debug)]
enum Step {
    /// Process a page we already hold
    Page(Value),
    /// Build and send the continuation request for this token
    Next(String),
    /// Nothing left
    Done,
}

struct Traversal<S> {
    source: S,
    step: Step,
    stop_item: Option<String>,
    state: PaginationState,
}

/// Stream every batch of a listing, starting from `initial`
///
/// `source` may be owned or borrowed (`&S` is itself a source).
///
/// Each poll yields one batch. The request for page *n + 1* is only sent when
/// batch *n + 1* is polled, so dropping the stream early never leaves a
/// request in flight. Every continuation token is used for exactly one
/// request.
///
/// When `stop_item` appears in a batch, that batch is cut just before it and
/// the stream ends, even if the page carried a continuation.
///
/// Fetch and extraction failures are yielded as `Err` and end the stream.
pub fn paginate<S>(
    source: S,
    initial: Value,
    stop_item: Option<String>,
) -> impl Stream<Item = Result<Batch>> + Send
where
    S: ListingSource,
{
    let traversal = Traversal {
        source,
        step: Step::Page(initial),
        stop_item,
        state: PaginationState::new(),
    };

    stream::try_unfold(traversal, advance::<S>)
}

/// Run one step: obtain the next page, yield its batch, decide what follows
async fn advance<S>(mut traversal: Traversal<S>) -> Result<Option<(Batch, Traversal<S>)>>
where
    S: ListingSource,
{
    let source = &traversal.source;
    let json = match std::mem::replace(&mut traversal.step, Step::Done) {
        Step::Done => return Ok(None),
        Step::Page(json) => json,
        Step::Next(token) => {
            let request = source.build_continuation(&token)?;
            debug!(url = %request.url, "Fetching continuation");
            source.fetch_continuation(request).await?
        }
    };

    let page = source.extract_page(&json)?;
    traversal.state.next_page();

    debug!(
        page = traversal.state.pages,
        items = page.items.len(),
        has_next = page.has_next(),
        "Extracted page"
    );

    if let StopResult::Stop(index) = check_stop(&page.items, traversal.stop_item.as_deref()) {
        info!(
            page = traversal.state.pages,
            index, "Stop item found, ending traversal"
        );
        let mut items = page.items;
        items.truncate(index);
        traversal.state.add_fetched(items.len() as u64);
        traversal.state.mark_done();
        return Ok(Some((items, traversal)));
    }

    traversal.state.add_fetched(page.items.len() as u64);
    match page.continuation {
        Some(token) => traversal.step = Step::Next(token),
        None => {
            traversal.state.mark_done();
            debug!(
                pages = traversal.state.pages,
                items = traversal.state.total_fetched,
                "Listing exhausted"
            );
        }
    }

    Ok(Some((page.items, traversal)))
}
