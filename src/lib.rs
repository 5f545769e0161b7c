//! YouTube Watch-Time Analyzer
//!
//! Fetches public metadata and statistics for YouTube videos, computes
//! heuristic watch-time optimization scores and suggestions, ranks batches
//! by lost watch-time potential, and groups videos into semantic clusters
//! for playlist suggestions.

pub mod clustering;
pub mod config;
pub mod duration;
pub mod embedding;
pub mod ranking;
pub mod scoring;
pub mod suggest;
pub mod video;
pub mod youtube;

#[cfg(feature = "api")]
pub mod api;

// Re-export main types for easy access
pub use crate::clustering::{ClusterAssignment, ClusteringConfig, ClusteringEngine};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::duration::{format_duration, parse_iso8601};
pub use crate::embedding::{create_embedder, Embedder, EmbeddingConfig, EmbeddingProvider};
pub use crate::ranking::{rank_by_potential, BatchVideo, Potential, RankedVideo};
pub use crate::scoring::{analyze_video, optimization_score, WatchTimeAnalysis};
pub use crate::suggest::{
    action_items, categorized_suggestions, quick_suggestions, CategorizedSuggestions,
};
pub use crate::video::{category_label, EngagementMetrics, VideoRecord};
pub use crate::youtube::{extract_video_id, YouTubeClient, YouTubeError};
