//! Pagination module
//!
//! Follows server-issued continuation tokens through a paginated listing.
//!
//! # Overview
//!
//! A [`ListingSource`] knows how to read one page (items plus an optional
//! continuation token) and how to fetch the page a token points to.
//! [`paginate`] drives a source from its first page, yielding one batch per
//! page as a lazy, single-pass stream.

mod stream;
mod types;

pub use stream::paginate;
pub use types::{check_stop, ListingSource, Page, PaginationState, StopResult};
