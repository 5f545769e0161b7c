//! Heuristic watch-time optimization scoring.
//!
//! The score is a fixed rule table applied to a video's attributes and
//! engagement ratios: base 50, independent additive adjustments, clamped to
//! [0, 100]. The table is data so the evaluation order and thresholds can be
//! audited and tested directly.

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::suggest;
use crate::video::{round2, EngagementMetrics, VideoRecord};

/// Every video starts here before adjustments.
pub const BASE_SCORE: i32 = 50;

/// One scoring adjustment: a named factor, the condition under which it
/// applies, and the signed amount it contributes.
pub struct ScoreRule {
    pub factor: &'static str,
    pub applies: fn(&VideoRecord, &EngagementMetrics) -> bool,
    pub adjustment: i32,
}

/// The scoring table, in evaluation order. Conditions within a factor group
/// are disjoint; conditions across groups are independent, so a video can
/// match several rules at once.
pub static SCORE_RULES: &[ScoreRule] = &[
    // Duration: the 8-15 minute band is the sweet spot for most channels.
    ScoreRule {
        factor: "duration under 2 minutes",
        applies: |v, _| v.duration_s < 120,
        adjustment: -10,
    },
    ScoreRule {
        factor: "duration in the 8-15 minute band",
        applies: |v, _| (480..=900).contains(&v.duration_s),
        adjustment: 10,
    },
    ScoreRule {
        factor: "duration over 30 minutes",
        applies: |v, _| v.duration_s > 1800,
        adjustment: -15,
    },
    // Engagement rate bands.
    ScoreRule {
        factor: "engagement above 5%",
        applies: |_, m| m.engagement_rate > 0.05,
        adjustment: 15,
    },
    ScoreRule {
        factor: "engagement above 2%",
        applies: |_, m| m.engagement_rate > 0.02 && m.engagement_rate <= 0.05,
        adjustment: 5,
    },
    ScoreRule {
        factor: "engagement below 0.5%",
        applies: |_, m| m.engagement_rate < 0.005,
        adjustment: -20,
    },
    // Title length.
    ScoreRule {
        factor: "title over 60 characters",
        applies: |v, _| v.title.chars().count() > 60,
        adjustment: -5,
    },
    ScoreRule {
        factor: "title under 30 characters",
        applies: |v, _| v.title.chars().count() < 30,
        adjustment: -5,
    },
    // View count bands.
    ScoreRule {
        factor: "over 100K views",
        applies: |v, _| v.views > 100_000,
        adjustment: 10,
    },
    ScoreRule {
        factor: "over 10K views",
        applies: |v, _| v.views > 10_000 && v.views <= 100_000,
        adjustment: 5,
    },
    ScoreRule {
        factor: "under 1K views",
        applies: |v, _| v.views < 1_000,
        adjustment: -10,
    },
];

/// Compute the optimization score for a video. Pure and total: identical
/// inputs always produce the identical score, and any input magnitude stays
/// within [0, 100].
pub fn optimization_score(video: &VideoRecord, metrics: &EngagementMetrics) -> u8 {
    let mut score = BASE_SCORE;
    for rule in SCORE_RULES {
        if (rule.applies)(video, metrics) {
            score += rule.adjustment;
        }
    }
    score.clamp(0, 100) as u8
}

/// Raw-count summary echoed back with each analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetricsSummary {
    pub duration_s: u64,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub like_to_view_ratio: f64,
    pub comment_to_view_ratio: f64,
}

/// Full single-video watch-time analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchTimeAnalysis {
    /// Estimated total watch seconds accumulated so far.
    pub current_watch_time: u64,
    /// Estimated average watch seconds per view.
    pub estimated_avg_watch_time: u64,
    /// Watch seconds recoverable with better retention.
    pub potential_improvement: u64,
    pub optimization_score: u8,
    /// Engagement rate as a percentage, rounded to two decimals.
    pub engagement_rate: f64,
    pub suggestions: Vec<String>,
    pub action_items: Vec<String>,
    pub video_metrics: VideoMetricsSummary,
}

/// Analyze a single video for watch-time optimization potential.
///
/// True retention data needs the Analytics API, so the average watch time is
/// estimated from the configured retention factor (YouTube videos typically
/// retain 40-60% of their runtime).
pub fn analyze_video(video: &VideoRecord, cfg: &AnalysisConfig) -> WatchTimeAnalysis {
    let metrics = EngagementMetrics::from_record(video);

    let duration = video.duration_s as f64;
    let views = video.views as f64;

    let estimated_avg_watch_time = duration * cfg.retention_estimate;
    let current_watch_time = views * estimated_avg_watch_time;
    let potential_improvement = views * duration * cfg.improvement_factor;

    let score = optimization_score(video, &metrics);

    WatchTimeAnalysis {
        current_watch_time: current_watch_time as u64,
        estimated_avg_watch_time: estimated_avg_watch_time as u64,
        potential_improvement: potential_improvement as u64,
        optimization_score: score,
        engagement_rate: round2(metrics.engagement_rate * 100.0),
        suggestions: suggest::quick_suggestions(video, &metrics),
        action_items: suggest::action_items(video, score),
        video_metrics: VideoMetricsSummary {
            duration_s: video.duration_s,
            views: video.views,
            likes: video.likes,
            comments: video.comments,
            like_to_view_ratio: metrics.like_to_view_ratio,
            comment_to_view_ratio: metrics.comment_to_view_ratio,
        },
    }
}
