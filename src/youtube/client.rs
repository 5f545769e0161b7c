use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use tracing::{debug, info, warn};
use url::Url;

use super::models::{
    ApiErrorResponse, SearchListResponse, Snippet, VideoListResponse, VideoResource,
};
use super::YouTubeError;
use crate::config::ApiConfig;
use crate::duration::parse_iso8601;
use crate::video::VideoRecord;

/// The API caps both search pages and videos.list id batches at 50.
const MAX_PAGE_SIZE: usize = 50;

/// Async client for the YouTube Data API v3.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(config: &ApiConfig) -> Result<Self, YouTubeError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| YouTubeError::Unauthorized("API key not configured".to_string()))?;

        Url::parse(&config.base_url)
            .map_err(|e| YouTubeError::Malformed(format!("invalid base url: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one video's snippet, statistics and duration.
    pub async fn fetch_video(&self, video_id: &str) -> Result<VideoRecord, YouTubeError> {
        debug!("Fetching video {}", video_id);

        let response = self
            .client
            .get(format!("{}/videos", self.base_url))
            .query(&[
                ("part", "snippet,statistics,contentDetails"),
                ("id", video_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: VideoListResponse = Self::decode(response).await?;

        let resource = body
            .items
            .into_iter()
            .next()
            .ok_or_else(|| YouTubeError::NotFound(video_id.to_string()))?;

        Ok(Self::record_from_resource(resource))
    }

    /// List up to `max_results` of a channel's videos with full statistics.
    ///
    /// The search endpoint only returns ids, so this pages through search
    /// results and then fetches statistics in batches of 50 ids.
    pub async fn list_channel_videos(
        &self,
        channel_id: &str,
        max_results: usize,
    ) -> Result<Vec<VideoRecord>, YouTubeError> {
        let mut video_ids: Vec<String> = Vec::new();
        let mut page_token: Option<String> = None;

        while video_ids.len() < max_results {
            let page_size = MAX_PAGE_SIZE.min(max_results - video_ids.len());
            let page = self
                .search_page(channel_id, page_size, page_token.as_deref())
                .await?;

            video_ids.extend(
                page.items
                    .into_iter()
                    .filter_map(|item| item.id.video_id),
            );

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        if video_ids.is_empty() {
            warn!("No videos found for channel {}", channel_id);
            return Ok(Vec::new());
        }

        let chunks: Vec<&[String]> = video_ids.chunks(MAX_PAGE_SIZE).collect();
        let batches = try_join_all(chunks.into_iter().map(|chunk| self.fetch_videos_chunk(chunk)))
            .await?;

        let videos: Vec<VideoRecord> = batches.into_iter().flatten().collect();
        info!(
            "📹 Fetched {} videos for channel {}",
            videos.len(),
            channel_id
        );

        Ok(videos)
    }

    async fn search_page(
        &self,
        channel_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<SearchListResponse, YouTubeError> {
        let page_size = page_size.to_string();
        let mut query = vec![
            ("part", "id"),
            ("channelId", channel_id),
            ("type", "video"),
            ("maxResults", page_size.as_str()),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&query)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn fetch_videos_chunk(&self, ids: &[String]) -> Result<Vec<VideoRecord>, YouTubeError> {
        let joined = ids.join(",");
        let response = self
            .client
            .get(format!("{}/videos", self.base_url))
            .query(&[
                ("part", "snippet,statistics,contentDetails"),
                ("id", joined.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: VideoListResponse = Self::decode(response).await?;
        Ok(body
            .items
            .into_iter()
            .map(Self::record_from_resource)
            .collect())
    }

    /// Check the response status, mapping API error envelopes into the
    /// error kinds callers dispatch on, then decode the payload.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, YouTubeError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            return Err(match status.as_u16() {
                401 | 403 => YouTubeError::Unauthorized(message),
                _ => YouTubeError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| YouTubeError::Malformed(e.to_string()))
    }

    /// Map one wire resource into a [`VideoRecord`].
    fn record_from_resource(resource: VideoResource) -> VideoRecord {
        let snippet = resource.snippet.unwrap_or_default();
        let statistics = resource.statistics.unwrap_or_default();
        let content_details = resource.content_details.unwrap_or_default();

        // An unparsable or missing duration collapses to 0 here, matching
        // the rest of the count fields; the codec itself reports None.
        let duration_s = content_details
            .duration
            .as_deref()
            .and_then(parse_iso8601)
            .unwrap_or(0);

        let thumbnail_url = snippet.thumbnails.as_ref().and_then(|t| {
            t.high
                .as_ref()
                .or(t.medium.as_ref())
                .or(t.default.as_ref())
                .map(|thumb| thumb.url.clone())
        });

        let video_url = Some(format!(
            "https://www.youtube.com/watch?v={}",
            resource.id
        ));

        VideoRecord {
            video_id: resource.id,
            title: snippet.title.clone(),
            description: snippet.description.clone(),
            tags: snippet.tags.clone().unwrap_or_default(),
            duration_s,
            views: parse_count(&statistics.view_count),
            likes: parse_count(&statistics.like_count),
            comments: parse_count(&statistics.comment_count),
            published_at: parse_timestamp(&snippet),
            category_id: snippet.category_id.filter(|id| !id.is_empty()),
            channel_title: snippet.channel_title,
            thumbnail_url,
            video_url,
        }
    }
}

/// Missing or unparsable counts become 0.
fn parse_count(value: &Option<String>) -> u64 {
    value
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Missing or unparsable timestamps become `None`.
fn parse_timestamp(snippet: &Snippet) -> Option<DateTime<Utc>> {
    snippet
        .published_at
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::models::{ContentDetails, Statistics};
    use chrono::Timelike;

    fn resource(json: &str) -> VideoResource {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_record_mapping() {
        let video = YouTubeClient::record_from_resource(resource(
            r#"{
                "id": "abc12345678",
                "snippet": {
                    "title": "A video",
                    "description": "About things",
                    "publishedAt": "2024-06-11T15:30:00Z",
                    "channelTitle": "A channel",
                    "tags": ["one", "two"],
                    "categoryId": "27",
                    "thumbnails": {
                        "medium": {"url": "https://i.ytimg.com/m.jpg"},
                        "default": {"url": "https://i.ytimg.com/d.jpg"}
                    }
                },
                "statistics": {"viewCount": "1234", "likeCount": "56", "commentCount": "7"},
                "contentDetails": {"duration": "PT8M20S"}
            }"#,
        ));

        assert_eq!(video.video_id, "abc12345678");
        assert_eq!(video.duration_s, 500);
        assert_eq!(video.views, 1234);
        assert_eq!(video.likes, 56);
        assert_eq!(video.comments, 7);
        assert_eq!(video.category_id.as_deref(), Some("27"));
        // High-res thumbnail missing, medium preferred over default.
        assert_eq!(
            video.thumbnail_url.as_deref(),
            Some("https://i.ytimg.com/m.jpg")
        );
        assert_eq!(video.published_at.unwrap().hour(), 15);
        assert_eq!(
            video.video_url.as_deref(),
            Some("https://www.youtube.com/watch?v=abc12345678")
        );
    }

    #[test]
    fn test_sparse_record_defaults_to_zero() {
        let video =
            YouTubeClient::record_from_resource(resource(r#"{"id": "abc12345678"}"#));

        assert_eq!(video.duration_s, 0);
        assert_eq!(video.views, 0);
        assert_eq!(video.likes, 0);
        assert!(video.published_at.is_none());
        assert!(video.category_id.is_none());
        assert!(video.tags.is_empty());
    }

    #[test]
    fn test_malformed_duration_and_timestamp_collapse() {
        let video = YouTubeClient::record_from_resource(resource(
            r#"{
                "id": "abc12345678",
                "snippet": {"title": "t", "publishedAt": "yesterday-ish"},
                "contentDetails": {"duration": "P0D"}
            }"#,
        ));

        assert_eq!(video.duration_s, 0);
        assert!(video.published_at.is_none());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(&Some("42".to_string())), 42);
        assert_eq!(parse_count(&Some("not-a-number".to_string())), 0);
        assert_eq!(parse_count(&None), 0);
    }

    #[test]
    fn test_count_structs_default_empty() {
        let stats = Statistics::default();
        assert!(stats.view_count.is_none());
        let details = ContentDetails::default();
        assert!(details.duration.is_none());
    }
}
