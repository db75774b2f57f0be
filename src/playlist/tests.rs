//! Tests for the playlist module

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::http::HttpClientConfig;
use crate::pagination::{ListingSource, Page};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

fn video(id: &str) -> Value {
    json!({ "playlistVideoRenderer": { "videoId": id } })
}

fn continuation_item(token: &str) -> Value {
    json!({
        "continuationItemRenderer": {
            "continuationEndpoint": { "continuationCommand": { "token": token } }
        }
    })
}

fn sections(video_list: Value) -> Value {
    json!([{
        "itemSectionRenderer": {
            "contents": [{ "playlistVideoListRenderer": { "contents": video_list } }]
        }
    }])
}

fn sidebar() -> Value {
    json!([
        {
            "playlistSidebarPrimaryInfoRenderer": {
                "title": { "runs": [{ "text": "Road Trip Mix" }] },
                "description": { "simpleText": "Songs for the drive" },
                "stats": [
                    { "runs": [{ "text": "1,234" }, { "text": " videos" }] },
                    { "simpleText": "5,678,901 views" },
                    { "runs": [{ "text": "Last updated on " }, { "text": "Mar 14, 2023" }] }
                ]
            }
        },
        {
            "playlistSidebarSecondaryInfoRenderer": {
                "videoOwner": {
                    "videoOwnerRenderer": {
                        "title": {
                            "runs": [{
                                "text": "Some Channel",
                                "navigationEndpoint": {
                                    "browseEndpoint": { "browseId": "UC1234567890" }
                                }
                            }]
                        }
                    }
                }
            }
        }
    ])
}

fn initial_data(video_list: Value) -> Value {
    json!({
        "contents": {
            "twoColumnBrowseResultsRenderer": {
                "tabs": [{
                    "tabRenderer": {
                        "content": { "sectionListRenderer": { "contents": sections(video_list) } }
                    }
                }]
            }
        },
        "sidebar": { "playlistSidebarRenderer": { "items": sidebar() } }
    })
}

fn page_html(data: &Value) -> String {
    format!(
        "<html><head><script>ytcfg.set({{\"INNERTUBE_API_KEY\": \"test-key\", \"HL\": \"en\"}});</script></head>\
         <body><script>var ytInitialData = {data};</script></body></html>"
    )
}

fn test_client() -> HttpClient {
    HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build()).unwrap()
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.uri(),
        ..Default::default()
    }
}

// ============================================================================
// Video extraction
// ============================================================================

#[test]
fn test_extract_videos_initial_shape() {
    let data = initial_data(json!([
        video("a"),
        video("b"),
        video("a"),
        json!({ "somethingElse": {} }),
        video("c"),
        continuation_item("tok1")
    ]));

    let page = extract_videos(&data).unwrap();

    assert_eq!(page.items, vec!["/watch?v=a", "/watch?v=b", "/watch?v=c"]);
    assert_eq!(page.continuation.as_deref(), Some("tok1"));
}

#[test]
fn test_extract_videos_submenu_section() {
    let mut data = initial_data(json!([]));
    data["contents"]["twoColumnBrowseResultsRenderer"]["tabs"][0]["tabRenderer"]["content"]
        ["sectionListRenderer"]["contents"] = json!([
        { "playlistSubmenuRenderer": {} },
        {
            "itemSectionRenderer": {
                "contents": [{ "playlistVideoListRenderer": { "contents": [video("x")] } }]
            }
        }
    ]);

    let page = extract_videos(&data).unwrap();

    assert_eq!(page, Page::last(vec!["/watch?v=x".to_string()]));
}

#[test]
fn test_extract_videos_continuation_shape() {
    let data = json!({
        "onResponseReceivedActions": [{
            "appendContinuationItemsAction": {
                "continuationItems": [video("d"), video("e")]
            }
        }]
    });

    let page = extract_videos(&data).unwrap();

    assert_eq!(page.items, vec!["/watch?v=d", "/watch?v=e"]);
    assert!(!page.has_next());
}

#[test]
fn test_extract_videos_empty_list() {
    let page = extract_videos(&initial_data(json!([]))).unwrap();
    assert_eq!(page, Page::default());
}

#[test]
fn test_extract_videos_missing_list() {
    let err = extract_videos(&json!({ "responseContext": {} })).unwrap_err();
    assert!(err.is_extraction_error());
    assert!(err.to_string().contains("no playlist video list"));
}

// ============================================================================
// Continuation requests
// ============================================================================

#[test]
fn test_build_continuation() {
    let client = test_client();
    let listing = BrowseListing::new(&client, "https://www.youtube.com/", "k3y", "2.1");

    let request = listing.build_continuation("tok1").unwrap();

    assert_eq!(request.url, "https://www.youtube.com/youtubei/v1/browse?key=k3y");
    assert_eq!(listing.browse_url(), request.url);
    assert_eq!(
        request.headers.get("X-YouTube-Client-Name"),
        Some(&"1".to_string())
    );
    assert_eq!(
        request.headers.get("X-YouTube-Client-Version"),
        Some(&"2.1".to_string())
    );
    assert_eq!(
        request.body,
        json!({
            "continuation": "tok1",
            "context": { "client": { "clientName": "WEB", "clientVersion": "2.1" } }
        })
    );
}

// ============================================================================
// Metadata
// ============================================================================

#[test]
fn test_metadata_from_sidebar() {
    let sidebar = sidebar();

    assert_eq!(metadata::title(&sidebar).unwrap(), "Road Trip Mix");
    assert_eq!(metadata::description(&sidebar), "Songs for the drive");
    assert_eq!(metadata::length(&sidebar).unwrap(), 1234);
    assert_eq!(metadata::views(&sidebar).unwrap(), 5_678_901);
    assert_eq!(
        metadata::last_updated(&sidebar),
        NaiveDate::from_ymd_opt(2023, 3, 14)
    );
    assert_eq!(metadata::owner(&sidebar).unwrap(), "Some Channel");
    assert_eq!(metadata::owner_id(&sidebar).unwrap(), "UC1234567890");
}

#[test]
fn test_metadata_missing_fields() {
    let mut sidebar = sidebar();
    let primary = &mut sidebar[0]["playlistSidebarPrimaryInfoRenderer"];
    primary.as_object_mut().unwrap().remove("description");
    primary["stats"][2]["runs"][1]["text"] = json!("today");
    primary["stats"][1]["simpleText"] = json!("No views");

    assert_eq!(metadata::description(&sidebar), "");
    assert_eq!(metadata::last_updated(&sidebar), None);
    assert!(matches!(
        metadata::views(&sidebar),
        Err(Error::InvalidNumber { .. })
    ));

    let only_primary = json!([sidebar[0].clone()]);
    assert!(metadata::owner(&only_primary).is_err());
    assert!(metadata::title(&json!([])).is_err());
}

// ============================================================================
// Playlist
// ============================================================================

#[test]
fn test_playlist_new() {
    let client = test_client();
    let playlist = Playlist::new(
        "https://www.youtube.com/playlist?list=PLtest",
        &client,
    )
    .unwrap();

    assert_eq!(playlist.id(), "PLtest");
    assert_eq!(
        playlist.playlist_url(),
        "https://www.youtube.com/playlist?list=PLtest"
    );
    assert!(format!("{playlist:?}").contains("html_loaded: false"));

    assert!(matches!(
        Playlist::new("https://www.youtube.com/watch?v=abc", &client),
        Err(Error::NotAPlaylist { .. })
    ));
}

#[tokio::test]
async fn test_playlist_page_fetched_once() {
    let server = MockServer::start().await;
    let data = initial_data(json!([video("a"), video("b")]));

    Mock::given(method("GET"))
        .and(path("/playlist"))
        .and(query_param("list", "PLtest"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_html(&data)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client();
    let playlist = Playlist::with_config(
        "https://www.youtube.com/playlist?list=PLtest",
        &client,
        config_for(&server),
    )
    .unwrap();

    assert_eq!(playlist.title().await.unwrap(), "Road Trip Mix");
    assert_eq!(playlist.description().await.unwrap(), "Songs for the drive");
    assert_eq!(playlist.length().await.unwrap(), 1234);
    assert_eq!(playlist.views().await.unwrap(), 5_678_901);
    assert_eq!(playlist.api_key().await.unwrap(), "test-key");
    assert_eq!(playlist.owner().await.unwrap(), "Some Channel");
    assert_eq!(
        playlist.owner_url().await.unwrap(),
        format!("{}/channel/UC1234567890", server.uri())
    );
    assert_eq!(
        playlist.last_updated().await.unwrap(),
        NaiveDate::from_ymd_opt(2023, 3, 14)
    );
    assert!(format!("{playlist:?}").contains("html_loaded: true"));
}

#[tokio::test]
async fn test_playlist_info() {
    let server = MockServer::start().await;
    let data = initial_data(json!([video("a")]));

    Mock::given(method("GET"))
        .and(path("/playlist"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_html(&data)))
        .mount(&server)
        .await;

    let client = test_client();
    let playlist = Playlist::with_config(
        "https://www.youtube.com/playlist?list=PLtest",
        &client,
        config_for(&server),
    )
    .unwrap();

    let info = playlist.info().await.unwrap();

    assert_eq!(
        info,
        PlaylistInfo {
            id: "PLtest".to_string(),
            url: format!("{}/playlist?list=PLtest", server.uri()),
            title: "Road Trip Mix".to_string(),
            description: "Songs for the drive".to_string(),
            length: 1234,
            views: 5_678_901,
            owner: Some("Some Channel".to_string()),
            owner_url: Some(format!("{}/channel/UC1234567890", server.uri())),
            last_updated: NaiveDate::from_ymd_opt(2023, 3, 14),
        }
    );
}

#[tokio::test]
async fn test_playlist_page_error_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlist"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client();
    let playlist = Playlist::with_config(
        "https://www.youtube.com/playlist?list=PLtest",
        &client,
        config_for(&server),
    )
    .unwrap();

    assert!(matches!(
        playlist.title().await,
        Err(Error::HttpStatus { status: 503, .. })
    ));
    assert!(playlist.html().await.unwrap_err().is_fetch_error());
}

#[tokio::test]
async fn test_playlist_without_initial_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlist"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>consent wall</html>"))
        .mount(&server)
        .await;

    let client = test_client();
    let playlist = Playlist::with_config(
        "https://www.youtube.com/playlist?list=PLtest",
        &client,
        config_for(&server),
    )
    .unwrap();

    assert!(matches!(
        playlist.length().await,
        Err(Error::MissingInitialData { .. })
    ));
    assert!(matches!(
        playlist.paginate(None).await,
        Err(Error::MissingInitialData { .. })
    ));
}
