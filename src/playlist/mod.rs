//! Playlist module
//!
//! Async access to a YouTube playlist page.
//!
//! # Overview
//!
//! - `Playlist` - fetches the playlist page once and memoizes what is
//!   extracted from it (HTML, `ytcfg`, initial data, sidebar)
//! - Metadata accessors (title, description, counts, owner, last update)
//! - `BrowseListing` - the browse-endpoint listing source used to page
//!   through the video list

mod listing;
mod metadata;

pub use listing::{extract_videos, BrowseListing};
pub use metadata::PlaylistInfo;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::extract::{self, lookup, lookup_str};
use crate::http::HttpClient;
use crate::pagination;
use crate::types::{video_id_from_path, watch_path, Batch};
use chrono::NaiveDate;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Stream of video-link batches, one per page
pub type BatchStream<'a> = BoxStream<'a, Result<Batch>>;

/// A YouTube playlist
///
/// Borrows the caller's HTTP client for every request. The page HTML is
/// fetched on first use and reused by every accessor.
pub struct Playlist<'a> {
    client: &'a HttpClient,
    config: ClientConfig,
    id: String,
    html: OnceCell<String>,
    ytcfg: OnceCell<Value>,
    initial_data: OnceCell<Value>,
    sidebar_info: OnceCell<Value>,
}

impl<'a> Playlist<'a> {
    /// Create a playlist from any URL carrying a `list` parameter
    pub fn new(url: &str, client: &'a HttpClient) -> Result<Self> {
        Self::with_config(url, client, ClientConfig::default())
    }

    /// Create a playlist with a custom client configuration
    pub fn with_config(url: &str, client: &'a HttpClient, config: ClientConfig) -> Result<Self> {
        let id = extract::playlist_id(url)?;
        Ok(Self {
            client,
            config,
            id,
            html: OnceCell::new(),
            ytcfg: OnceCell::new(),
            initial_data: OnceCell::new(),
            sidebar_info: OnceCell::new(),
        })
    }

    /// Playlist id (`list` parameter)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Canonical playlist page URL
    pub fn playlist_url(&self) -> String {
        format!("{}/playlist?list={}", self.config.base(), self.id)
    }

    // ========================================================================
    // Memoized page data
    // ========================================================================

    /// Playlist page HTML
    pub async fn html(&self) -> Result<&str> {
        let html = self
            .html
            .get_or_try_init(|| async {
                let url = self.playlist_url();
                debug!(%url, "Fetching playlist page");
                self.client.get_text(&url).await
            })
            .await?;
        Ok(html.as_str())
    }

    /// Merged `ytcfg` object from the page
    pub async fn ytcfg(&self) -> Result<&Value> {
        self.ytcfg
            .get_or_try_init(|| async { extract::ytcfg(self.html().await?) })
            .await
    }

    /// `ytInitialData` object from the page
    pub async fn initial_data(&self) -> Result<&Value> {
        self.initial_data
            .get_or_try_init(|| async { extract::initial_data(self.html().await?) })
            .await
    }

    /// Sidebar item array (`sidebar.playlistSidebarRenderer.items`)
    pub async fn sidebar_info(&self) -> Result<&Value> {
        self.sidebar_info
            .get_or_try_init(|| async {
                let data = self.initial_data().await?;
                let items = lookup(data, "sidebar.playlistSidebarRenderer.items")?;
                if items.is_array() {
                    Ok(items.clone())
                } else {
                    Err(Error::extraction(
                        "sidebar.playlistSidebarRenderer.items",
                        "expected an array",
                    ))
                }
            })
            .await
    }

    /// `INNERTUBE_API_KEY` from `ytcfg`
    pub async fn api_key(&self) -> Result<&str> {
        lookup_str(self.ytcfg().await?, "INNERTUBE_API_KEY")
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Playlist title
    pub async fn title(&self) -> Result<String> {
        metadata::title(self.sidebar_info().await?)
    }

    /// Playlist description, empty when there is none
    pub async fn description(&self) -> Result<String> {
        Ok(metadata::description(self.sidebar_info().await?))
    }

    /// Number of videos in the playlist
    pub async fn length(&self) -> Result<u64> {
        metadata::length(self.sidebar_info().await?)
    }

    /// Playlist view count
    pub async fn views(&self) -> Result<u64> {
        metadata::views(self.sidebar_info().await?)
    }

    /// Date the playlist was last updated, if the page states one
    pub async fn last_updated(&self) -> Result<Option<NaiveDate>> {
        Ok(metadata::last_updated(self.sidebar_info().await?))
    }

    /// Owner display name
    pub async fn owner(&self) -> Result<String> {
        metadata::owner(self.sidebar_info().await?)
    }

    /// Owner channel id
    pub async fn owner_id(&self) -> Result<String> {
        metadata::owner_id(self.sidebar_info().await?)
    }

    /// Owner channel URL
    pub async fn owner_url(&self) -> Result<String> {
        Ok(format!(
            "{}/channel/{}",
            self.config.base(),
            self.owner_id().await?
        ))
    }

    /// All metadata at once; owner fields are optional
    pub async fn info(&self) -> Result<PlaylistInfo> {
        let sidebar = self.sidebar_info().await?;
        let owner_url = metadata::owner_id(sidebar)
            .ok()
            .map(|id| format!("{}/channel/{id}", self.config.base()));

        Ok(PlaylistInfo {
            id: self.id.clone(),
            url: self.playlist_url(),
            title: metadata::title(sidebar)?,
            description: metadata::description(sidebar),
            length: metadata::length(sidebar)?,
            views: metadata::views(sidebar)?,
            owner: metadata::owner(sidebar).ok(),
            owner_url,
            last_updated: metadata::last_updated(sidebar),
        })
    }

    // ========================================================================
    // Video listing
    // ========================================================================

    /// Browse listing for this playlist's continuations
    pub async fn listing(&self) -> Result<BrowseListing<'a>> {
        let api_key = self.api_key().await?;
        Ok(BrowseListing::new(
            self.client,
            self.config.base(),
            api_key,
            self.config.client_version.clone(),
        ))
    }

    /// Stream the playlist's watch links page by page
    ///
    /// With `until`, the page containing that video id is cut just before
    /// it and nothing after it is fetched.
    pub async fn paginate(&self, until: Option<&str>) -> Result<BatchStream<'a>> {
        let listing = self.listing().await?;
        let initial = self.initial_data().await?.clone();
        Ok(pagination::paginate(listing, initial, until.map(watch_path)).boxed())
    }

    /// Every video URL in the playlist, in order
    pub async fn video_urls(&self) -> Result<Vec<String>> {
        self.collect_urls(None).await
    }

    /// Video URLs up to, but not including, `video_id`
    pub async fn trimmed(&self, video_id: &str) -> Result<Vec<String>> {
        self.collect_urls(Some(video_id)).await
    }

    async fn collect_urls(&self, until: Option<&str>) -> Result<Vec<String>> {
        let batches: Vec<Batch> = self.paginate(until).await?.try_collect().await?;
        let base = self.config.base();
        let urls: Vec<String> = batches
            .into_iter()
            .flatten()
            .map(|link| format!("{base}{link}"))
            .collect();

        info!(playlist = %self.id, videos = urls.len(), "Collected playlist videos");
        Ok(urls)
    }

    /// Video ids in the playlist, in order
    pub async fn video_ids(&self) -> Result<Vec<String>> {
        let batches: Vec<Batch> = self.paginate(None).await?.try_collect().await?;
        Ok(batches
            .iter()
            .flatten()
            .filter_map(|link| video_id_from_path(link))
            .map(String::from)
            .collect())
    }
}

impl std::fmt::Debug for Playlist<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playlist")
            .field("id", &self.id)
            .field("html_loaded", &self.html.initialized())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
