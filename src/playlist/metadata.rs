//! Playlist metadata from the page sidebar
//!
//! All functions take the sidebar item array
//! (`sidebar.playlistSidebarRenderer.items`). The first item holds the
//! primary info (title, description, stats), the second the owner.

use crate::error::Result;
use crate::extract::{find, lookup_str, parse_count};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const PRIMARY: &str = "0.playlistSidebarPrimaryInfoRenderer";
const OWNER_RUN: &str =
    "1.playlistSidebarSecondaryInfoRenderer.videoOwner.videoOwnerRenderer.title.runs.0";

/// Playlist title
pub fn title(sidebar: &Value) -> Result<String> {
    lookup_str(sidebar, &format!("{PRIMARY}.title.runs.0.text")).map(String::from)
}

/// Playlist description, empty when the playlist has none
pub fn description(sidebar: &Value) -> String {
    find(sidebar, &format!("{PRIMARY}.description.simpleText"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Number of videos, from a stat like `"1,234 videos"`
pub fn length(sidebar: &Value) -> Result<u64> {
    parse_count(lookup_str(sidebar, &format!("{PRIMARY}.stats.0.runs.0.text"))?)
}

/// View count, from a stat like `"1,234,567 views"`
pub fn views(sidebar: &Value) -> Result<u64> {
    parse_count(lookup_str(sidebar, &format!("{PRIMARY}.stats.1.simpleText"))?)
}

/// Date of the last update
///
/// `None` when the stat is missing or relative ("Updated today").
pub fn last_updated(sidebar: &Value) -> Option<NaiveDate> {
    let text = find(sidebar, &format!("{PRIMARY}.stats.2.runs.1.text"))?.as_str()?;
    match NaiveDate::parse_from_str(text.trim(), "%b %d, %Y") {
        Ok(date) => Some(date),
        Err(e) => {
            debug!("Unrecognized last-updated text '{text}': {e}");
            None
        }
    }
}

/// Display name of the playlist owner
pub fn owner(sidebar: &Value) -> Result<String> {
    lookup_str(sidebar, &format!("{OWNER_RUN}.text")).map(String::from)
}

/// Channel id of the playlist owner
pub fn owner_id(sidebar: &Value) -> Result<String> {
    lookup_str(
        sidebar,
        &format!("{OWNER_RUN}.navigationEndpoint.browseEndpoint.browseId"),
    )
    .map(String::from)
}

/// Summary of everything the sidebar says about a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistInfo {
    /// Playlist id (`list` parameter)
    pub id: String,
    /// Canonical playlist URL
    pub url: String,
    pub title: String,
    pub description: String,
    /// Number of videos
    pub length: u64,
    pub views: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}
