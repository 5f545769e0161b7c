use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of one video's public data, as returned by the
/// YouTube Data API.
///
/// Counts the API omits (likes and comments can be hidden) are recorded as
/// zero, and a duration that could not be parsed is recorded as zero as
/// well. Only the publication timestamp keeps an explicit "unknown" state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Duration in seconds; 0 when unknown.
    pub duration_s: u64,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    /// Publication timestamp; `None` when absent or unparsable.
    pub published_at: Option<DateTime<Utc>>,
    /// YouTube category id, a key into [`category_label`].
    pub category_id: Option<String>,
    pub channel_title: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
}

/// Engagement ratios derived from raw counts. Never stored; recomputed from
/// a [`VideoRecord`] whenever needed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    /// `(likes + comments) / views`, as a fraction. 0.0 when the video has
    /// no views.
    pub engagement_rate: f64,
    /// Likes per view, as a percentage rounded to two decimals.
    pub like_to_view_ratio: f64,
    /// Comments per view, as a percentage rounded to two decimals.
    pub comment_to_view_ratio: f64,
}

impl EngagementMetrics {
    pub fn from_record(video: &VideoRecord) -> Self {
        if video.views == 0 {
            return Self {
                engagement_rate: 0.0,
                like_to_view_ratio: 0.0,
                comment_to_view_ratio: 0.0,
            };
        }

        let views = video.views as f64;
        Self {
            engagement_rate: (video.likes + video.comments) as f64 / views,
            like_to_view_ratio: round2(video.likes as f64 / views * 100.0),
            comment_to_view_ratio: round2(video.comments as f64 / views * 100.0),
        }
    }
}

/// Round to two decimal places for display.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// YouTube video category labels, keyed by the `categoryId` the API assigns.
static CATEGORY_LABELS: &[(&str, &str)] = &[
    ("1", "Film & Animation"),
    ("2", "Autos & Vehicles"),
    ("10", "Music"),
    ("15", "Pets & Animals"),
    ("17", "Sports"),
    ("19", "Travel & Events"),
    ("20", "Gaming"),
    ("22", "People & Blogs"),
    ("23", "Comedy"),
    ("24", "Entertainment"),
    ("25", "News & Politics"),
    ("26", "Howto & Style"),
    ("27", "Education"),
    ("28", "Science & Technology"),
];

/// Look up the human-readable label for a category id.
pub fn category_label(category_id: &str) -> Option<&'static str> {
    CATEGORY_LABELS
        .iter()
        .find(|(id, _)| *id == category_id)
        .map(|(_, label)| *label)
}
