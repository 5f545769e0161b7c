//! YouTube Data API v3 client.
//!
//! This is the I/O boundary of the crate: it fetches public video metadata
//! and statistics with an API key and maps the wire shapes into
//! [`VideoRecord`](crate::video::VideoRecord). Failures here carry distinct
//! kinds so callers can tell "not found" from auth and network trouble; the
//! analysis engine itself never produces errors.

pub mod client;
pub mod models;

pub use client::YouTubeClient;

use regex::Regex;
use thiserror::Error;

/// Errors surfaced by the fetch layer.
#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("video not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("YouTube API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed API response: {0}")]
    Malformed(String),
}

/// URL shapes a video id can be pulled from.
static VIDEO_URL_PATTERNS: &[&str] = &[
    r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)",
    r"youtube\.com/v/([^&\n?#]+)",
];

/// Extract a video id from any common YouTube URL form, or accept a bare
/// 11-character id as-is.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    for pattern in VIDEO_URL_PATTERNS {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(captures) = re.captures(input) {
                if let Some(id) = captures.get(1) {
                    return Some(id.as_str().to_string());
                }
            }
        }
    }

    // Bare video id.
    if let Ok(re) = Regex::new(r"^[A-Za-z0-9_-]{11}$") {
        if re.is_match(input) {
            return Some(input.to_string());
        }
    }

    None
}
