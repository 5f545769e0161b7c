//! Batch ranking by lost watch-time potential.
//!
//! With true retention data (average view duration per video) the ranker
//! estimates recoverable watch seconds directly; without it, it falls back
//! to flagging high-traffic short videos as worth investigating.

use serde::{Deserialize, Serialize};

use crate::video::VideoRecord;

/// One video's inputs to the ranker. The average view duration comes from
/// an analytics source the public Data API does not expose, so it is
/// optional caller-supplied data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchVideo {
    pub video_id: String,
    pub views: u64,
    pub duration_s: u64,
    pub avg_view_duration: Option<f64>,
}

impl BatchVideo {
    pub fn from_record(record: &VideoRecord) -> Self {
        Self {
            video_id: record.video_id.clone(),
            views: record.views,
            duration_s: record.duration_s,
            avg_view_duration: None,
        }
    }

    pub fn with_avg_view_duration(mut self, seconds: f64) -> Self {
        self.avg_view_duration = Some(seconds);
        self
    }
}

/// The potential metric computed for a video, tagged by ranking mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Potential {
    /// Watch seconds recoverable if drop-off were eliminated.
    RetentionGap {
        potential_seconds_per_view: f64,
        potential_watch_seconds: f64,
    },
    /// Views per runtime second; flags high-traffic, low-runtime videos.
    Fallback { potential_score: f64 },
}

impl Potential {
    /// The value the batch is sorted by, descending.
    pub fn sort_key(&self) -> f64 {
        match self {
            Potential::RetentionGap {
                potential_watch_seconds,
                ..
            } => *potential_watch_seconds,
            Potential::Fallback { potential_score } => *potential_score,
        }
    }
}

/// A video annotated with its potential metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedVideo {
    #[serde(flatten)]
    pub video: BatchVideo,
    pub potential: Potential,
}

/// Annotate a batch with potential metrics and sort it descending.
///
/// The retention-gap mode applies only when every entry carries an average
/// view duration; a batch with any gaps ranks entirely in fallback mode, so
/// all entries are compared on the same key. The sort is stable: ties keep
/// input order.
pub fn rank_by_potential(videos: Vec<BatchVideo>) -> Vec<RankedVideo> {
    let retention_mode = !videos.is_empty() && videos.iter().all(|v| v.avg_view_duration.is_some());

    let mut ranked: Vec<RankedVideo> = videos
        .into_iter()
        .map(|video| {
            let potential = if retention_mode {
                let avg = video.avg_view_duration.unwrap_or(0.0);
                let per_view = (video.duration_s as f64 - avg).max(0.0);
                Potential::RetentionGap {
                    potential_seconds_per_view: per_view,
                    potential_watch_seconds: video.views as f64 * per_view,
                }
            } else {
                Potential::Fallback {
                    potential_score: video.views as f64 / video.duration_s.max(1) as f64,
                }
            };
            RankedVideo { video, potential }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.potential
            .sort_key()
            .partial_cmp(&a.potential.sort_key())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
}
