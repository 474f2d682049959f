use crate::config::Config;
use crate::error::MetadataError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// One language's localized title/description pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localization {
    pub title: String,
    pub description: String,
}

/// The slice of video metadata this tool works with: the source snippet plus
/// every existing localization, fetched in a single round trip.
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub localizations: HashMap<String, Localization>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    #[serde(default)]
    snippet: Snippet,
    #[serde(default)]
    localizations: HashMap<String, Localization>,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    id: &'a str,
    localizations: &'a HashMap<String, Localization>,
}

fn classify_failure(status: u16, message: String) -> MetadataError {
    if status == 401 || status == 403 {
        MetadataError::PermissionDenied { status, message }
    } else {
        MetadataError::Api { status, message }
    }
}

/// Fetch the snippet and localizations for one video in a single request.
///
/// Requesting both parts together guarantees the localization map and the
/// source title/description come from the same read, so a later merge never
/// works against a stale map.
pub async fn fetch_video(
    client: &reqwest::Client,
    config: &Config,
    access_token: &str,
    video_id: &str,
) -> Result<VideoMetadata, MetadataError> {
    let url = format!("{}/videos", config.youtube_api_base);

    let response = client
        .get(&url)
        .bearer_auth(access_token)
        .query(&[("part", "snippet,localizations"), ("id", video_id)])
        .send()
        .await
        .map_err(MetadataError::Http)?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(classify_failure(status, message));
    }

    let list: VideoListResponse = response.json().await.map_err(MetadataError::Decode)?;

    // The API reports an unknown (or invisible) id as an empty item list
    let video = list
        .items
        .into_iter()
        .next()
        .ok_or_else(|| MetadataError::NotFound(video_id.to_string()))?;

    debug!(
        "Fetched video {} with {} existing localizations",
        video.id,
        video.localizations.len()
    );

    Ok(VideoMetadata {
        id: video.id,
        title: video.snippet.title,
        description: video.snippet.description,
        localizations: video.localizations,
    })
}

/// Replace the video's localizations field with the given map.
///
/// The API has no partial-patch semantics for this field: the body replaces
/// every stored localization, so callers must pass the full merged map, not
/// just the entries changed this run. At most one attempt is made.
pub async fn update_localizations(
    client: &reqwest::Client,
    config: &Config,
    access_token: &str,
    video_id: &str,
    localizations: &HashMap<String, Localization>,
) -> Result<(), MetadataError> {
    let url = format!("{}/videos", config.youtube_api_base);

    let response = client
        .put(&url)
        .bearer_auth(access_token)
        .query(&[("part", "localizations")])
        .json(&UpdateRequest {
            id: video_id,
            localizations,
        })
        .send()
        .await
        .map_err(MetadataError::Http)?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(classify_failure(status, message));
    }

    info!(
        "Updated video {} with {} localizations",
        video_id,
        localizations.len()
    );
    Ok(())
}
