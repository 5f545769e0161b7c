//! Category-partitioned optimization suggestions.
//!
//! Five fixed categories, each an ordered rule cascade over the same video
//! attributes the scorer reads, plus publication timing when a timestamp is
//! available. Category order and within-category rule order are stable
//! output guarantees.

use chrono::{Datelike, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use super::{apply_rules, SuggestionRule};
use crate::video::{EngagementMetrics, VideoRecord};

/// Suggestions partitioned by category, in the fixed category order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorizedSuggestions {
    pub content_strategy: Vec<String>,
    pub technical_optimization: Vec<String>,
    pub engagement_tactics: Vec<String>,
    pub competitive_insights: Vec<String>,
    pub posting_strategy: Vec<String>,
}

impl CategorizedSuggestions {
    /// Iterate categories in their fixed order with display names.
    pub fn sections(&self) -> [(&'static str, &Vec<String>); 5] {
        [
            ("Content Strategy", &self.content_strategy),
            ("Technical Optimization", &self.technical_optimization),
            ("Engagement Tactics", &self.engagement_tactics),
            ("Competitive Insights", &self.competitive_insights),
            ("Posting Strategy", &self.posting_strategy),
        ]
    }

    /// Total suggestion count across all categories.
    pub fn len(&self) -> usize {
        self.sections().iter().map(|(_, s)| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Canned per-category insights, keyed by YouTube category id.
pub static CATEGORY_INSIGHTS: &[(&str, &str)] = &[
    ("1", "Film & Animation: Focus on trending topics and seasonal content for better discoverability."),
    ("2", "Autos & Vehicles: Create comparison videos and 'vs' content for high engagement."),
    ("10", "Music: Consider lyric videos, covers, or music production tutorials."),
    ("15", "Pets & Animals: Create heartwarming or funny compilations with storytelling elements."),
    ("17", "Sports: Focus on highlights, analysis, and prediction content."),
    ("19", "Travel & Events: Use location-based keywords and seasonal content strategies."),
    ("20", "Gaming: Stream highlights, create tutorials, or review new games."),
    ("22", "People & Blogs: Focus on storytelling and personal experiences."),
    ("23", "Comedy: Create trending comedy formats and collaborate with other creators."),
    ("24", "Entertainment: Stay current with pop culture and entertainment news."),
    ("25", "News & Politics: Focus on timely, accurate reporting with clear sources."),
    ("26", "Howto & Style: Create step-by-step tutorials and before/after content."),
    ("27", "Education: Use clear explanations with visual aids and examples."),
    ("28", "Science & Technology: Focus on explaining complex topics in simple terms."),
];

const ACTION_KEYWORDS: &[&str] = &["how to", "tutorial", "guide", "tips", "review"];

fn title_lacks_action_keyword(video: &VideoRecord) -> bool {
    let title = video.title.to_lowercase();
    !ACTION_KEYWORDS.iter().any(|k| title.contains(k))
}

fn published_on_weekend(video: &VideoRecord) -> bool {
    video
        .published_at
        .map(|t| matches!(t.weekday(), Weekday::Sat | Weekday::Sun))
        .unwrap_or(false)
}

fn published_off_peak(video: &VideoRecord) -> bool {
    video
        .published_at
        .map(|t| t.hour() <= 6 || t.hour() >= 22)
        .unwrap_or(false)
}

static CONTENT_STRATEGY_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        applies: |v, _| title_lacks_action_keyword(v),
        message: "Consider adding action-oriented keywords like 'How to', 'Tutorial', 'Tips', or 'Guide' to improve searchability.",
    },
    SuggestionRule {
        applies: |v, _| v.title.split_whitespace().count() < 5,
        message: "Your title could be more descriptive. Add specific details about what viewers will learn or gain.",
    },
    SuggestionRule {
        applies: |v, _| v.description.chars().count() < 100,
        message: "Your video description is quite short. YouTube descriptions should be 150-300 words for better SEO.",
    },
    SuggestionRule {
        applies: |v, _| v.description.chars().count() < 100,
        message: "Add timestamps, key points, and relevant keywords to your description.",
    },
    SuggestionRule {
        applies: |v, _| v.tags.len() < 5,
        message: "Consider adding more relevant tags (10-15 tags) to improve discoverability across different search queries.",
    },
    SuggestionRule {
        applies: |v, _| v.duration_s < 300,
        message: "For short videos, focus on one specific value proposition. Deliver it quickly and clearly.",
    },
    SuggestionRule {
        applies: |v, _| v.duration_s > 1200,
        message: "Long-form content works well if it maintains engagement. Consider breaking into chapters or series.",
    },
];

static TECHNICAL_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        applies: |v, _| v.views < 1_000,
        message: "Focus on improving audio quality first - it's often more important than video quality for retention.",
    },
    SuggestionRule {
        applies: |v, _| v.views < 1_000,
        message: "Ensure good lighting and clear visuals, especially in the first 15 seconds.",
    },
    SuggestionRule {
        applies: |v, _| v.duration_s > 600,
        message: "Add pattern interrupts every 2-3 minutes: graphics, questions, or topic changes to maintain attention.",
    },
    SuggestionRule {
        applies: |v, _| v.duration_s > 600,
        message: "Include visual cues and on-screen text to help viewers follow along.",
    },
    // Timestamp rules skip silently when no timestamp is available.
    SuggestionRule {
        applies: |v, _| published_on_weekend(v),
        message: "Consider testing weekday uploads as well - many channels perform better Tuesday-Thursday.",
    },
    SuggestionRule {
        applies: |v, _| published_off_peak(v),
        message: "Your upload time might not be optimal. Test posting during peak hours for your audience.",
    },
];

static ENGAGEMENT_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        applies: |v, _| v.duration_s > 300,
        message: "Strengthen your opening hook. The first 15 seconds determine if viewers stay or leave.",
    },
    SuggestionRule {
        applies: |v, _| v.duration_s > 300,
        message: "Promise specific value in the first 30 seconds: 'By the end of this video, you'll know exactly how to...'",
    },
    SuggestionRule {
        applies: |v, _| v.views > 1_000,
        message: "Add mid-video call-to-actions: 'If this is helpful, hit the like button' to boost engagement signals.",
    },
    SuggestionRule {
        applies: |v, _| v.views > 1_000,
        message: "Ask specific questions in the comments to encourage discussion.",
    },
    SuggestionRule {
        applies: |_, m| m.engagement_rate < 0.02,
        message: "Low engagement detected. Try adding more interactive elements: polls, questions, or challenges.",
    },
    SuggestionRule {
        applies: |_, m| m.engagement_rate < 0.02,
        message: "Create controversy or debate to encourage comments (while staying within YouTube guidelines).",
    },
    SuggestionRule {
        applies: |_, m| m.engagement_rate > 0.05,
        message: "Great engagement! Consider creating follow-up content based on viewer feedback and questions.",
    },
];

static COMPETITIVE_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        applies: |_, _| true,
        message: "Research top-performing videos in your niche and analyze their structure and hooks.",
    },
    SuggestionRule {
        applies: |_, _| true,
        message: "Consider collaborating with creators in your field to cross-promote and gain new audiences.",
    },
];

static POSTING_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        applies: |v, _| v.views < 500,
        message: "Focus on consistency over frequency. Upload regularly (weekly or bi-weekly) to build audience expectation.",
    },
    SuggestionRule {
        applies: |v, _| v.views < 500,
        message: "Promote your videos on social media platforms to drive initial views.",
    },
    SuggestionRule {
        applies: |_, _| true,
        message: "Share your video on relevant Reddit communities, Facebook groups, and Discord servers.",
    },
    SuggestionRule {
        applies: |_, _| true,
        message: "Create short clips or teasers for TikTok/Instagram Reels to drive traffic to the full video.",
    },
    SuggestionRule {
        applies: |v, _| v.views > 1_000,
        message: "Respond to comments within the first few hours to boost engagement and algorithmic performance.",
    },
    SuggestionRule {
        applies: |v, _| v.views > 1_000,
        message: "Create community posts to keep your audience engaged between video uploads.",
    },
    SuggestionRule {
        applies: |_, _| true,
        message: "Use YouTube's search suggestions to optimize your title and description for better discoverability.",
    },
    SuggestionRule {
        applies: |_, _| true,
        message: "Create custom thumbnails that create curiosity gaps - show something that makes people want to click.",
    },
];

/// Generate the full category-partitioned suggestion set for one video.
pub fn categorized_suggestions(
    video: &VideoRecord,
    metrics: &EngagementMetrics,
) -> CategorizedSuggestions {
    let mut competitive = Vec::new();
    if let Some(category_id) = video.category_id.as_deref() {
        if let Some((_, insight)) = CATEGORY_INSIGHTS.iter().find(|(id, _)| *id == category_id) {
            competitive.push(insight.to_string());
        }
    }
    competitive.extend(apply_rules(COMPETITIVE_RULES, video, metrics));

    CategorizedSuggestions {
        content_strategy: apply_rules(CONTENT_STRATEGY_RULES, video, metrics),
        technical_optimization: apply_rules(TECHNICAL_RULES, video, metrics),
        engagement_tactics: apply_rules(ENGAGEMENT_RULES, video, metrics),
        competitive_insights: competitive,
        posting_strategy: apply_rules(POSTING_RULES, video, metrics),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    fn record() -> VideoRecord {
        VideoRecord {
            video_id: "test".to_string(),
            title: "How to grow tomatoes in a small apartment garden".to_string(),
            description: "x".repeat(200),
            tags: (0..8).map(|i| format!("tag{}", i)).collect(),
            duration_s: 600,
            views: 50_000,
            likes: 1_000,
            comments: 200,
            category_id: Some("26".to_string()),
            ..Default::default()
        }
    }

    fn suggestions_for(video: &VideoRecord) -> CategorizedSuggestions {
        categorized_suggestions(video, &EngagementMetrics::from_record(video))
    }

    #[test]
    fn test_category_order_is_fixed() {
        let names: Vec<_> = suggestions_for(&record())
            .sections()
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Content Strategy",
                "Technical Optimization",
                "Engagement Tactics",
                "Competitive Insights",
                "Posting Strategy"
            ]
        );
    }

    #[test]
    fn test_category_insight_leads_competitive_section() {
        let suggestions = suggestions_for(&record());
        assert!(suggestions.competitive_insights[0].starts_with("Howto & Style:"));
        // The two constant insights always follow.
        assert_eq!(suggestions.competitive_insights.len(), 3);
    }

    #[test]
    fn test_unknown_category_keeps_constant_insights() {
        let mut video = record();
        video.category_id = Some("999".to_string());
        let suggestions = suggestions_for(&video);
        assert_eq!(suggestions.competitive_insights.len(), 2);
        assert!(suggestions.competitive_insights[0].starts_with("Research top-performing"));
    }

    #[test]
    fn test_short_description_adds_two_messages() {
        let mut video = record();
        video.description = "brief".to_string();
        let suggestions = suggestions_for(&video);
        let hits: Vec<_> = suggestions
            .content_strategy
            .iter()
            .filter(|s| s.contains("description"))
            .collect();
        assert_eq!(hits.len(), 2);
        assert!(hits[0].contains("quite short"));
        assert!(hits[1].contains("timestamps"));
    }

    #[test]
    fn test_action_keyword_title_skips_keyword_rule() {
        let suggestions = suggestions_for(&record());
        assert!(!suggestions
            .content_strategy
            .iter()
            .any(|s| s.contains("action-oriented keywords")));

        let mut video = record();
        video.title = "My trip through the mountains of Peru last summer".to_string();
        let suggestions = suggestions_for(&video);
        assert!(suggestions
            .content_strategy
            .iter()
            .any(|s| s.contains("action-oriented keywords")));
    }

    #[test]
    fn test_weekend_upload_triggers_timing_rule() {
        let mut video = record();
        // Saturday afternoon.
        video.published_at = Some(Utc.with_ymd_and_hms(2024, 6, 15, 14, 0, 0).unwrap());
        let suggestions = suggestions_for(&video);
        assert!(suggestions
            .technical_optimization
            .iter()
            .any(|s| s.contains("weekday uploads")));
        assert!(!suggestions
            .technical_optimization
            .iter()
            .any(|s| s.contains("peak hours")));
    }

    #[test]
    fn test_off_peak_upload_triggers_timing_rule() {
        let mut video = record();
        // Tuesday at 3am.
        video.published_at = Some(Utc.with_ymd_and_hms(2024, 6, 11, 3, 0, 0).unwrap());
        let suggestions = suggestions_for(&video);
        assert!(suggestions
            .technical_optimization
            .iter()
            .any(|s| s.contains("peak hours")));
        assert!(!suggestions
            .technical_optimization
            .iter()
            .any(|s| s.contains("weekday uploads")));
    }

    #[test]
    fn test_missing_timestamp_skips_timing_rules() {
        let suggestions = suggestions_for(&record());
        assert!(!suggestions
            .technical_optimization
            .iter()
            .any(|s| s.contains("weekday uploads") || s.contains("peak hours")));
    }

    #[test]
    fn test_low_engagement_tactics() {
        let mut video = record();
        video.likes = 100;
        video.comments = 50;
        let suggestions = suggestions_for(&video);
        let tactics = &suggestions.engagement_tactics;
        assert!(tactics.iter().any(|s| s.contains("interactive elements")));
        assert!(tactics.iter().any(|s| s.contains("controversy")));
        assert!(!tactics.iter().any(|s| s.contains("Great engagement!")));
    }
}
