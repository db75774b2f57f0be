//! Playlist video listing
//!
//! Reads video links out of playlist pages and browse continuation
//! responses, and builds the browse requests that fetch further pages.

use crate::error::{Error, Result};
use crate::extract::{find, lookup_array};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{ListingSource, Page};
use crate::types::{watch_path, ContinuationRequest, StringMap};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashSet;
use tracing::debug;

/// Section list of a playlist page as rendered into `ytInitialData`
const SECTION_CONTENTS: &str =
    "contents.twoColumnBrowseResultsRenderer.tabs.0.tabRenderer.content.sectionListRenderer.contents";

/// Video list inside one section
const VIDEO_LIST: &str = "itemSectionRenderer.contents.0.playlistVideoListRenderer.contents";

/// Items of a browse continuation response
const CONTINUATION_ITEMS: &str =
    "onResponseReceivedActions.0.appendContinuationItemsAction.continuationItems";

const CONTINUATION_TOKEN: &str =
    "continuationItemRenderer.continuationEndpoint.continuationCommand.token";

const VIDEO_ID: &str = "playlistVideoRenderer.videoId";

/// Locate the raw item list in either page shape
fn video_items(data: &Value) -> Result<&Vec<Value>> {
    if let Some(sections) = find(data, SECTION_CONTENTS) {
        // playlists with a submenu carry the list in the second section
        for section in ["0", "1"] {
            if let Some(Value::Array(items)) = find(sections, &format!("{section}.{VIDEO_LIST}")) {
                return Ok(items);
            }
        }
    }

    lookup_array(data, CONTINUATION_ITEMS).map_err(|_| {
        Error::extraction(
            format!("{SECTION_CONTENTS} | {CONTINUATION_ITEMS}"),
            "no playlist video list in page",
        )
    })
}

/// Extract watch links and the continuation token from a page
///
/// Works on both the initial page data and continuation responses. A
/// trailing continuation item supplies the token. Duplicate links are
/// dropped, keeping the first occurrence.
pub fn extract_videos(data: &Value) -> Result<Page> {
    let items = video_items(data)?;

    let (items, continuation) = match items.split_last() {
        Some((last, rest)) => match find(last, CONTINUATION_TOKEN).and_then(Value::as_str) {
            Some(token) => (rest, Some(token.to_string())),
            None => (items.as_slice(), None),
        },
        None => (items.as_slice(), None),
    };

    let mut seen = HashSet::new();
    let mut links = Vec::with_capacity(items.len());
    for item in items {
        match find(item, VIDEO_ID).and_then(Value::as_str) {
            Some(id) => {
                let link = watch_path(id);
                if seen.insert(link.clone()) {
                    links.push(link);
                }
            }
            None => debug!("Skipping playlist item without a video id"),
        }
    }

    Ok(Page {
        items: links,
        continuation,
    })
}

/// Browse endpoint listing for one playlist
#[derive(Debug, Clone)]
pub struct BrowseListing<'a> {
    client: &'a HttpClient,
    browse_url: String,
    client_version: String,
}

impl<'a> BrowseListing<'a> {
    /// Create a listing that posts continuations to `{base_url}/youtubei/v1/browse`
    pub fn new(
        client: &'a HttpClient,
        base_url: &str,
        api_key: &str,
        client_version: impl Into<String>,
    ) -> Self {
        Self {
            client,
            browse_url: format!(
                "{}/youtubei/v1/browse?key={api_key}",
                base_url.trim_end_matches('/')
            ),
            client_version: client_version.into(),
        }
    }

    /// The browse URL continuations are posted to
    pub fn browse_url(&self) -> &str {
        &self.browse_url
    }
}

#[async_trait]
impl ListingSource for BrowseListing<'_> {
    fn extract_page(&self, page: &Value) -> Result<Page> {
        extract_videos(page)
    }

    fn build_continuation(&self, token: &str) -> Result<ContinuationRequest> {
        let mut headers = StringMap::new();
        headers.insert("X-YouTube-Client-Name".to_string(), "1".to_string());
        headers.insert(
            "X-YouTube-Client-Version".to_string(),
            self.client_version.clone(),
        );

        let body = json!({
            "continuation": token,
            "context": {
                "client": {
                    "clientName": "WEB",
                    "clientVersion": self.client_version,
                }
            }
        });

        Ok(ContinuationRequest::new(&self.browse_url, headers, body))
    }

    async fn fetch_continuation(&self, request: ContinuationRequest) -> Result<Value> {
        let config = RequestConfig::new()
            .headers(&request.headers)
            .json(request.body);
        self.client.post_json(&request.url, config).await
    }
}
