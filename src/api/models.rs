//! API data models

use serde::{Deserialize, Serialize};

use crate::scoring::WatchTimeAnalysis;
use crate::suggest::CategorizedSuggestions;
use crate::video::VideoRecord;

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Single-video analysis payload
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisPayload {
    pub video: VideoRecord,
    pub analysis: WatchTimeAnalysis,
}

/// Categorized suggestion payload
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionsPayload {
    pub video_id: String,
    pub optimization_score: u8,
    pub suggestions: CategorizedSuggestions,
}

/// Health probe payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthPayload {
    pub status: String,
    pub version: String,
}
