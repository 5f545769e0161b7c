//! Optimization suggestion cascades.
//!
//! Every generator here is an ordered table of (predicate, message) pairs
//! evaluated top to bottom; each predicate that holds appends its message.
//! Keeping the tables declarative makes the evaluation order auditable and
//! lets tests target individual rules.

pub mod categories;

pub use categories::{categorized_suggestions, CategorizedSuggestions, CATEGORY_INSIGHTS};

use crate::video::{EngagementMetrics, VideoRecord};

/// One suggestion rule: when the predicate holds, the message is appended.
pub struct SuggestionRule {
    pub applies: fn(&VideoRecord, &EngagementMetrics) -> bool,
    pub message: &'static str,
}

/// Evaluate a rule table in order against one video.
pub(crate) fn apply_rules(
    rules: &[SuggestionRule],
    video: &VideoRecord,
    metrics: &EngagementMetrics,
) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| (rule.applies)(video, metrics))
        .map(|rule| rule.message.to_string())
        .collect()
}

/// The flat suggestion cascade shown with every analysis. Duration rules are
/// disjoint bands; the final rule is unconditional footer guidance.
static QUICK_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        applies: |v, _| v.duration_s < 120,
        message: "Consider making longer, more detailed content. Videos under 2 minutes often have lower watch time retention.",
    },
    SuggestionRule {
        applies: |v, _| v.duration_s > 1800,
        message: "Your video is quite long (30+ minutes). Consider breaking it into a series or adding chapter markers to improve retention.",
    },
    SuggestionRule {
        applies: |v, _| (120..300).contains(&v.duration_s),
        message: "Short videos (under 5 minutes) can perform well if they're engaging. Focus on delivering value quickly.",
    },
    SuggestionRule {
        applies: |v, _| (300..=1800).contains(&v.duration_s),
        message: "Your video length is in a good range. Focus on maintaining viewer engagement throughout.",
    },
    SuggestionRule {
        applies: |_, m| m.engagement_rate < 0.01,
        message: "Low engagement detected. Consider improving your hook in the first 15 seconds to capture attention immediately.",
    },
    SuggestionRule {
        applies: |_, m| m.engagement_rate > 0.05,
        message: "Great engagement rate! Your content resonates well with viewers.",
    },
    SuggestionRule {
        applies: |v, _| v.title.chars().count() > 60,
        message: "Your title is quite long. Consider making it more concise while keeping key keywords (under 60 characters).",
    },
    SuggestionRule {
        applies: |v, _| v.title.chars().count() < 20,
        message: "Your title might be too short. Consider adding more descriptive keywords to improve discoverability.",
    },
    SuggestionRule {
        applies: |v, _| v.duration_s > 600,
        message: "Add chapter markers or timestamps to help viewers navigate to specific sections they're interested in.",
    },
    SuggestionRule {
        applies: |v, _| v.duration_s > 600,
        message: "Consider adding pattern interrupts every 2-3 minutes to maintain attention.",
    },
    SuggestionRule {
        applies: |v, _| v.views < 1_000,
        message: "Focus on building audience retention. Ask questions or create curiosity gaps to encourage continued viewing.",
    },
    SuggestionRule {
        applies: |_, _| true,
        message: "Ensure your thumbnail and title work together to create a compelling promise that the video delivers on.",
    },
];

/// Generate the flat suggestion list for one video.
pub fn quick_suggestions(video: &VideoRecord, metrics: &EngagementMetrics) -> Vec<String> {
    apply_rules(QUICK_RULES, video, metrics)
}

/// Generate prioritized action items from a video and its optimization
/// score. Score-bucket items come first, then the conditional items, then
/// two constant follow-ups.
pub fn action_items(video: &VideoRecord, score: u8) -> Vec<String> {
    let mut items = Vec::new();

    if score < 30 {
        items.push(
            "🔴 High Priority: Major optimization needed. Focus on improving retention in the first 30 seconds."
                .to_string(),
        );
        items.push(
            "🔴 High Priority: Review your title and thumbnail for clarity and appeal.".to_string(),
        );
    } else if score < 60 {
        items.push(
            "🟡 Medium Priority: Moderate optimization opportunities. Focus on engagement improvements."
                .to_string(),
        );
    } else {
        items.push(
            "🟢 Good: Your video is well-optimized. Focus on maintaining current strategies."
                .to_string(),
        );
    }

    if video.duration_s < 120 {
        items.push(
            "📈 Test longer format content (8-15 minutes) to increase watch time potential."
                .to_string(),
        );
    } else if video.duration_s > 1800 {
        items.push("✂️ Consider creating a condensed version or adding chapter markers.".to_string());
    }

    let engagement_rate = (video.likes + video.comments) as f64 / video.views.max(1) as f64;
    if engagement_rate < 0.02 {
        items.push(
            "💬 Add more interactive elements: questions, polls, or calls-to-action to boost engagement."
                .to_string(),
        );
    }

    items.push(
        "📊 Monitor audience retention graphs in YouTube Analytics to identify drop-off points."
            .to_string(),
    );
    items.push(
        "🎯 A/B test different thumbnails for future videos based on what works best.".to_string(),
    );

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(duration_s: u64, views: u64, likes: u64, comments: u64) -> VideoRecord {
        VideoRecord {
            video_id: "test".to_string(),
            title: "A title in the thirty-to-sixty char range".to_string(),
            duration_s,
            views,
            likes,
            comments,
            ..Default::default()
        }
    }

    fn suggestions_for(video: &VideoRecord) -> Vec<String> {
        quick_suggestions(video, &EngagementMetrics::from_record(video))
    }

    #[test]
    fn test_duration_bands_are_disjoint() {
        for (duration, fragment) in [
            (90, "under 2 minutes"),
            (2000, "quite long"),
            (200, "deliver"),
            (600, "good range"),
        ] {
            let video = record(duration, 50_000, 1_000, 200);
            let hits: Vec<_> = suggestions_for(&video)
                .into_iter()
                .filter(|s| {
                    s.contains("under 2 minutes")
                        || s.contains("quite long")
                        || s.contains("delivering value quickly")
                        || s.contains("good range")
                })
                .collect();
            assert_eq!(hits.len(), 1, "duration {} should hit one band", duration);
            assert!(hits[0].contains(fragment), "duration {}: {:?}", duration, hits);
        }
    }

    #[test]
    fn test_footer_is_always_present() {
        let video = record(600, 50_000, 1_000, 200);
        let suggestions = suggestions_for(&video);
        assert!(suggestions.last().unwrap().contains("thumbnail and title"));
    }

    #[test]
    fn test_long_video_gets_structure_suggestions_in_order() {
        let video = record(700, 50_000, 1_000, 200);
        let suggestions = suggestions_for(&video);
        let chapters = suggestions
            .iter()
            .position(|s| s.contains("chapter markers or timestamps"))
            .unwrap();
        let interrupts = suggestions
            .iter()
            .position(|s| s.contains("pattern interrupts"))
            .unwrap();
        assert!(chapters < interrupts);
    }

    #[test]
    fn test_action_items_low_score_leads_with_high_priority() {
        let video = record(600, 50_000, 1_000, 200);
        let items = action_items(&video, 25);
        assert!(items[0].contains("High Priority: Major optimization needed"));
        assert!(items[1].contains("High Priority: Review your title"));
        assert!(!items[2].contains("High Priority"));
    }

    #[test]
    fn test_action_items_buckets() {
        let video = record(600, 50_000, 1_000, 200);
        assert!(action_items(&video, 45)[0].contains("Medium Priority"));
        assert!(action_items(&video, 60)[0].contains("Good"));
        assert!(action_items(&video, 95)[0].contains("Good"));
    }

    #[test]
    fn test_action_items_constant_trailers() {
        let video = record(90, 100, 0, 0);
        let items = action_items(&video, 80);
        let n = items.len();
        assert!(items[n - 2].contains("audience retention graphs"));
        assert!(items[n - 1].contains("A/B test"));
    }

    #[test]
    fn test_action_items_short_video_gets_format_item() {
        let video = record(90, 50_000, 5_000, 500);
        let items = action_items(&video, 70);
        assert!(items.iter().any(|i| i.contains("longer format content")));

        let video = record(2400, 50_000, 5_000, 500);
        let items = action_items(&video, 70);
        assert!(items.iter().any(|i| i.contains("condensed version")));
    }

    #[test]
    fn test_low_engagement_action_item_uses_raw_counts() {
        let video = record(600, 100_000, 100, 50);
        let items = action_items(&video, 70);
        assert!(items.iter().any(|i| i.contains("interactive elements")));
    }
}
