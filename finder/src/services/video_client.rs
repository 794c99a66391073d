//! Video lookup client for the YouTube Data API search endpoint

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use shared::{FetchFailure, VideoEmbed};
use crate::traits::VideoService;

#[derive(Debug, Deserialize)]
struct VideoSearchResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: VideoItemId,
}

/// Channel and playlist hits carry no `videoId`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItemId {
    #[serde(default)]
    video_id: Option<String>,
}

/// Real video service calling `GET {base}/search`
#[derive(Clone)]
pub struct YouTubeVideoClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl YouTubeVideoClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://www.googleapis.com/youtube/v3";
    pub const DEFAULT_LANGUAGE: &'static str = "fr";
    const QUERY_SUFFIX: &'static str = "recipe";

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            language: language.into(),
        }
    }

    pub(crate) fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl VideoService for YouTubeVideoClient {
    async fn find_video(&self, query: &str) -> Result<VideoEmbed, FetchFailure> {
        let search_text = format!("{} {}", query, Self::QUERY_SUFFIX);

        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("part", "snippet"),
                ("q", search_text.as_str()),
                ("maxResults", "1"),
                ("key", self.api_key.as_str()),
                ("relevanceLanguage", self.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchFailure::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::from_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
            ));
        }

        let body: VideoSearchResponse = response
            .json()
            .await
            .map_err(|e| FetchFailure::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let embed = body
            .items
            .first()
            .and_then(|item| item.id.video_id.as_deref())
            .map(VideoEmbed::from_video_id)
            .unwrap_or_default();

        debug!(query, found = !embed.is_empty(), "Video lookup completed");
        Ok(embed)
    }
}
