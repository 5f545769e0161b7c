//! Wire models for the Data API responses we consume.
//!
//! The API reports counts as decimal strings and omits fields freely, so
//! everything optional here stays optional until the client maps it into a
//! `VideoRecord`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    pub id: String,
    pub snippet: Option<Snippet>,
    pub statistics: Option<Statistics>,
    pub content_details: Option<ContentDetails>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub published_at: Option<String>,
    pub channel_title: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category_id: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    pub duration: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub video_id: Option<String>,
}

/// Error envelope the API returns on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_resource_decodes_stringly_counts() {
        let json = r#"{
            "items": [{
                "id": "abc12345678",
                "snippet": {
                    "title": "A video",
                    "description": "About things",
                    "publishedAt": "2024-06-11T15:00:00Z",
                    "channelTitle": "A channel",
                    "tags": ["one", "two"],
                    "categoryId": "27",
                    "thumbnails": {"high": {"url": "https://i.ytimg.com/x.jpg"}}
                },
                "statistics": {"viewCount": "1234", "likeCount": "56"},
                "contentDetails": {"duration": "PT8M20S"}
            }]
        }"#;

        let decoded: VideoListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.items.len(), 1);
        let video = &decoded.items[0];
        assert_eq!(video.id, "abc12345678");
        let stats = video.statistics.as_ref().unwrap();
        assert_eq!(stats.view_count.as_deref(), Some("1234"));
        // commentCount hidden on this video.
        assert!(stats.comment_count.is_none());
    }

    #[test]
    fn test_sparse_resource_decodes() {
        let json = r#"{"items": [{"id": "abc12345678"}]}"#;
        let decoded: VideoListResponse = serde_json::from_str(json).unwrap();
        assert!(decoded.items[0].snippet.is_none());
    }

    #[test]
    fn test_error_envelope_decodes() {
        let json = r#"{"error": {"code": 403, "message": "quotaExceeded"}}"#;
        let decoded: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.error.code, 403);
        assert_eq!(decoded.error.message, "quotaExceeded");
    }
}
