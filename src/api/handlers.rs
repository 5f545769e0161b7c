//! API request handlers

use crate::config::Config;
use crate::scoring::{analyze_video, optimization_score};
use crate::suggest::categorized_suggestions;
use crate::video::EngagementMetrics;
use crate::youtube::{YouTubeClient, YouTubeError};

use super::models::{AnalysisPayload, HealthPayload, SuggestionsPayload};

/// Health check payload
pub fn health_check() -> HealthPayload {
    HealthPayload {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Fetch one video and run the full watch-time analysis.
pub async fn analyze(
    client: &YouTubeClient,
    config: &Config,
    video_id: &str,
) -> Result<AnalysisPayload, YouTubeError> {
    let video = client.fetch_video(video_id).await?;
    let analysis = analyze_video(&video, &config.analysis);

    Ok(AnalysisPayload { video, analysis })
}

/// Fetch one video and generate the categorized suggestion set.
pub async fn suggestions(
    client: &YouTubeClient,
    video_id: &str,
) -> Result<SuggestionsPayload, YouTubeError> {
    let video = client.fetch_video(video_id).await?;
    let metrics = EngagementMetrics::from_record(&video);

    Ok(SuggestionsPayload {
        optimization_score: optimization_score(&video, &metrics),
        suggestions: categorized_suggestions(&video, &metrics),
        video_id: video.video_id,
    })
}
