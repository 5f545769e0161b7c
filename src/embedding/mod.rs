//! Sentence-embedding providers.
//!
//! Clustering needs a dense vector per text blob. The model itself is an
//! external capability reached over HTTP; this module defines the provider
//! trait, its configuration, and a factory. The embedder is an explicitly
//! constructed component handed to whoever needs it, so tests can
//! substitute a deterministic stub.

pub mod providers;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Embedding provider types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum EmbeddingProvider {
    /// Any OpenAI-compatible local inference server (LM Studio, llama.cpp).
    LmStudio,
    OpenAI,
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    /// API endpoint (for local providers)
    pub endpoint: Option<String>,
    /// API key (for cloud providers)
    pub api_key: Option<String>,
    /// Model to use
    pub model: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::LmStudio,
            endpoint: Some("http://localhost:1234/v1/embeddings".to_string()),
            api_key: None,
            model: "all-minilm-l6-v2".to_string(),
            timeout_seconds: 60,
        }
    }
}

/// Trait for embedding providers. One call embeds a whole batch; the result
/// holds one vector per input text, in input order.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
    async fn is_available(&self) -> bool;
    fn provider_type(&self) -> EmbeddingProvider;
}

/// Create an embedder instance based on configuration
pub fn create_embedder(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
    match config.provider {
        EmbeddingProvider::LmStudio => Ok(Box::new(providers::LmStudioEmbedder::new(
            config.clone(),
        )?)),
        EmbeddingProvider::OpenAI => Ok(Box::new(providers::OpenAIEmbedder::new(config.clone())?)),
    }
}
