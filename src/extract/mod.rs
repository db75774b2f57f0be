//! Extraction module
//!
//! Turns raw pages into structured data:
//! - `initial_data` / `ytcfg` find the JSON blobs embedded in page HTML
//! - `lookup` and friends walk dot-paths through parsed JSON
//! - `playlist_id` pulls the `list` parameter out of a playlist URL

mod html;
mod json;

pub use html::{initial_data, object_at, ytcfg};
pub use json::{find, lookup, lookup_array, lookup_str, parse_count};

use crate::error::{Error, Result};

/// Extract the playlist id (`list` query parameter) from a URL
pub fn playlist_id(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url)?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "list")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::NotAPlaylist {
            url: url.to_string(),
        })
}
