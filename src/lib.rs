// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tubelist
//!
//! Async reader for YouTube playlists.
//!
//! ## Features
//!
//! - **Playlist metadata**: title, description, video count, views, owner, last update
//! - **Lazy listing**: video links streamed page by page, following continuation tokens
//! - **Stop id**: end a traversal just before a known video without fetching further pages
//! - **Shared client**: one `HttpClient` (with optional rate limiting) for any number of playlists
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use tubelist::{http::HttpClient, Playlist, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = HttpClient::new()?;
//!     let playlist = Playlist::new("https://www.youtube.com/playlist?list=PL...", &client)?;
//!
//!     println!("{} ({} videos)", playlist.title().await?, playlist.length().await?);
//!
//!     // One batch of watch links per page
//!     let mut pages = playlist.paginate(None).await?;
//!     while let Some(batch) = pages.try_next().await? {
//!         println!("{batch:?}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        Playlist                           │
//! │  html() → ytcfg() / initial_data() → sidebar_info()       │
//! │  title() length() views() owner() ...   paginate(until)   │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴──────────┬───────────────────┐
//! │   Extract    │       Pagination       │       HTTP        │
//! ├──────────────┼────────────────────────┼───────────────────┤
//! │ ytInitialData│ ListingSource          │ GET / POST JSON   │
//! │ ytcfg        │ paginate() stream      │ Rate Limit        │
//! │ JSON paths   │ stop id truncation     │ Timeouts          │
//! └──────────────┴────────────────────────┴───────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// HTTP client with rate limiting
pub mod http;

/// Page data extraction (embedded JSON, JSON paths)
pub mod extract;

/// Continuation-token traversal
pub mod pagination;

/// Playlist access
pub mod playlist;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::ClientConfig;
pub use pagination::{paginate, ListingSource, Page};
pub use playlist::{BatchStream, Playlist, PlaylistInfo};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
