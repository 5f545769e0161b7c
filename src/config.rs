use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::clustering::ClusteringConfig;
use crate::embedding::{EmbeddingConfig, EmbeddingProvider};

/// Configuration for the watch-time analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// YouTube Data API settings
    pub api: ApiConfig,

    /// Analysis constants
    pub analysis: AnalysisConfig,

    /// Embedding provider settings
    pub embedding: EmbeddingConfig,

    /// Playlist clustering settings
    pub clustering: ClusteringConfig,

    /// Output settings
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key for the YouTube Data API v3
    pub api_key: Option<String>,

    /// Base URL for the Data API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Default number of channel videos to fetch for batch analysis
    pub max_results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Assumed fraction of a video's runtime the average viewer watches.
    /// YouTube channels typically see 40-60% retention.
    pub retention_estimate: f64,

    /// Fraction of total runtime treated as recoverable watch time.
    pub improvement_factor: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            retention_estimate: 0.5,
            improvement_factor: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format for the CLI
    pub format: OutputFormat,

    /// Directory for saved JSON reports; reports are only written when set
    pub report_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_paths = [
            "watchtime-analyzer.toml",
            "config/watchtime-analyzer.toml",
            "~/.config/watchtime-analyzer/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        // Fall back to environment variables
        Self::from_env()
    }

    /// Load configuration from environment variables on top of defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(api_key) = std::env::var("WATCHTIME_API_KEY") {
            config.api.api_key = Some(api_key);
        }

        if let Ok(max_results) = std::env::var("WATCHTIME_MAX_RESULTS") {
            config.api.max_results = max_results.parse().unwrap_or(25);
        }

        if let Ok(endpoint) = std::env::var("WATCHTIME_EMBEDDING_ENDPOINT") {
            config.embedding.endpoint = Some(endpoint);
        }

        if let Ok(embedding_key) = std::env::var("WATCHTIME_EMBEDDING_API_KEY") {
            config.embedding.api_key = Some(embedding_key);
        }

        if let Ok(clusters) = std::env::var("WATCHTIME_CLUSTERS") {
            config.clustering.n_clusters = clusters.parse().unwrap_or(8);
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.max_results == 0 {
            return Err(anyhow!("max_results must be greater than 0"));
        }

        if self.api.timeout_seconds == 0 {
            return Err(anyhow!("timeout_seconds must be greater than 0"));
        }

        if !(0.0..=1.0).contains(&self.analysis.retention_estimate)
            || self.analysis.retention_estimate == 0.0
        {
            return Err(anyhow!("retention_estimate must be in (0, 1]"));
        }

        if self.analysis.improvement_factor < 0.0 {
            return Err(anyhow!("improvement_factor must not be negative"));
        }

        if self.clustering.n_clusters == 0 {
            return Err(anyhow!("n_clusters must be greater than 0"));
        }

        if self.clustering.top_k_per_cluster == 0 {
            return Err(anyhow!("top_k_per_cluster must be greater than 0"));
        }

        if self.embedding.provider == EmbeddingProvider::OpenAI
            && self.embedding.api_key.is_none()
        {
            return Err(anyhow!("API key required for the OpenAI embedding provider"));
        }

        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Watch-Time Analyzer Configuration:\n\
            - API key set: {}\n\
            - Max results: {}\n\
            - Retention estimate: {:.0}%\n\
            - Embedding provider: {:?}\n\
            - Clusters: {}\n\
            - Output format: {:?}",
            self.api.api_key.is_some(),
            self.api.max_results,
            self.analysis.retention_estimate * 100.0,
            self.embedding.provider,
            self.clustering.n_clusters,
            self.output.format,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                api_key: None,
                base_url: "https://www.googleapis.com/youtube/v3".to_string(),
                timeout_seconds: 30,
                max_results: 25,
            },
            analysis: AnalysisConfig::default(),
            embedding: EmbeddingConfig::default(),
            clustering: ClusteringConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Text,
                report_dir: None,
            },
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.config.api.api_key = Some(api_key);
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.config.api.max_results = max_results;
        self
    }

    pub fn with_retention_estimate(mut self, retention: f64) -> Self {
        self.config.analysis.retention_estimate = retention;
        self
    }

    pub fn with_clusters(mut self, n_clusters: usize) -> Self {
        self.config.clustering.n_clusters = n_clusters;
        self
    }

    pub fn with_embedding_provider(mut self, provider: EmbeddingProvider) -> Self {
        self.config.embedding.provider = provider;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.max_results, 25);
        assert_eq!(config.analysis.retention_estimate, 0.5);
        assert_eq!(config.clustering.n_clusters, 8);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_api_key("key".to_string())
            .with_max_results(40)
            .with_clusters(4)
            .with_output_format(OutputFormat::Json)
            .build();

        assert_eq!(config.api.api_key.as_deref(), Some("key"));
        assert_eq!(config.api.max_results, 40);
        assert_eq!(config.clustering.n_clusters, 4);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut bad = Config::default();
        bad.analysis.retention_estimate = 1.5;
        assert!(bad.validate().is_err());

        let mut bad = Config::default();
        bad.clustering.n_clusters = 0;
        assert!(bad.validate().is_err());

        let mut bad = Config::default();
        bad.embedding.provider = EmbeddingProvider::OpenAI;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        let restored: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(restored.api.max_results, config.api.max_results);
        assert_eq!(restored.clustering.n_clusters, config.clustering.n_clusters);
    }
}
