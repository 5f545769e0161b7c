//! Semantic clustering of videos for playlist suggestion.
//!
//! Each video's title and description are embedded as one text blob and the
//! resulting vectors are grouped by hierarchical agglomerative clustering.
//! Nothing is persisted; every invocation rebuilds the clustering from
//! scratch.

pub mod agglomerative;

use std::collections::{BTreeMap, HashMap};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::embedding::Embedder;
use crate::video::VideoRecord;

/// Configuration for playlist clustering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Target cluster count; silently reduced when the batch is smaller.
    pub n_clusters: usize,
    /// How many top-viewed videos to suggest per cluster playlist.
    pub top_k_per_cluster: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            n_clusters: 8,
            top_k_per_cluster: 5,
        }
    }
}

/// The result of clustering one batch of videos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterAssignment {
    /// Video id to cluster label, label in `[0, effective cluster count)`.
    pub assignments: HashMap<String, usize>,
    /// Cluster label to its top-K member ids, ordered by views descending.
    pub playlists: BTreeMap<usize, Vec<String>>,
}

impl ClusterAssignment {
    /// Number of distinct clusters in the assignment.
    pub fn cluster_count(&self) -> usize {
        self.playlists.len()
    }
}

/// Clustering engine owning the embedding backend it runs on.
pub struct ClusteringEngine {
    embedder: Box<dyn Embedder>,
    config: ClusteringConfig,
}

impl ClusteringEngine {
    pub fn new(embedder: Box<dyn Embedder>, config: ClusteringConfig) -> Self {
        Self { embedder, config }
    }

    /// Group a batch of videos into semantic clusters using the configured
    /// target cluster count.
    pub async fn cluster_videos(&self, videos: &[VideoRecord]) -> Result<ClusterAssignment> {
        self.cluster_videos_into(videos, self.config.n_clusters).await
    }

    /// Group a batch of videos into semantic clusters and derive playlist
    /// candidates. The effective cluster count is
    /// `min(n_clusters, videos.len())`.
    pub async fn cluster_videos_into(
        &self,
        videos: &[VideoRecord],
        n_clusters: usize,
    ) -> Result<ClusterAssignment> {
        if videos.is_empty() {
            return Ok(ClusterAssignment {
                assignments: HashMap::new(),
                playlists: BTreeMap::new(),
            });
        }

        let texts: Vec<String> = videos
            .iter()
            .map(|v| format!("{} {}", v.title, v.description))
            .collect();

        debug!("Embedding {} video descriptions", texts.len());
        let vectors = self.embedder.embed(&texts).await?;

        if vectors.len() != videos.len() {
            return Err(anyhow!(
                "embedder returned {} vectors for {} videos",
                vectors.len(),
                videos.len()
            ));
        }

        let effective = n_clusters.min(videos.len());
        let labels = agglomerative::cluster_labels(&vectors, effective);

        let mut assignments = HashMap::new();
        let mut members: BTreeMap<usize, Vec<&VideoRecord>> = BTreeMap::new();
        for (video, &label) in videos.iter().zip(labels.iter()) {
            assignments.insert(video.video_id.clone(), label);
            members.entry(label).or_default().push(video);
        }

        let playlists = members
            .into_iter()
            .map(|(label, mut cluster)| {
                cluster.sort_by_key(|v| std::cmp::Reverse(v.views));
                let top: Vec<String> = cluster
                    .iter()
                    .take(self.config.top_k_per_cluster)
                    .map(|v| v.video_id.clone())
                    .collect();
                (label, top)
            })
            .collect();

        let assignment = ClusterAssignment {
            assignments,
            playlists,
        };

        info!(
            "🗂️ Clustered {} videos into {} groups",
            videos.len(),
            assignment.cluster_count()
        );

        Ok(assignment)
    }
}
