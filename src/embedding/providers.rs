use super::{Embedder, EmbeddingConfig, EmbeddingProvider};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Request body shared by OpenAI-compatible embedding endpoints.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
    index: usize,
}

/// Decode a response, restoring input order and checking completeness.
fn collect_vectors(mut response: EmbeddingsResponse, expected: usize) -> Result<Vec<Vec<f32>>> {
    response.data.sort_by_key(|row| row.index);
    let vectors: Vec<Vec<f32>> = response.data.into_iter().map(|row| row.embedding).collect();

    if vectors.len() != expected {
        return Err(anyhow!(
            "embedding count mismatch: got {}, expected {}",
            vectors.len(),
            expected
        ));
    }

    Ok(vectors)
}

/// LM Studio (or any OpenAI-compatible local server) embedder
pub struct LmStudioEmbedder {
    config: EmbeddingConfig,
    client: reqwest::Client,
}

impl LmStudioEmbedder {
    pub fn new(config: EmbeddingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl Embedder for LmStudioEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let endpoint = self
            .config
            .endpoint
            .as_ref()
            .ok_or_else(|| anyhow!("LM Studio endpoint not configured"))?;

        let request = EmbeddingsRequest {
            model: &self.config.model,
            input: texts,
        };

        debug!("Embedding {} texts via {}", texts.len(), endpoint);

        let response = self.client.post(endpoint).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("embedding API error {}: {}", status, text));
        }

        collect_vectors(response.json().await?, texts.len())
    }

    async fn is_available(&self) -> bool {
        let endpoint = match &self.config.endpoint {
            Some(ep) => ep,
            None => return false,
        };

        // The models listing doubles as a health probe.
        let health_endpoint = endpoint.replace("/v1/embeddings", "/v1/models");

        match self.client.get(&health_endpoint).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn provider_type(&self) -> EmbeddingProvider {
        EmbeddingProvider::LmStudio
    }
}

/// OpenAI embeddings API provider
pub struct OpenAIEmbedder {
    config: EmbeddingConfig,
    client: reqwest::Client,
}

const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

impl OpenAIEmbedder {
    pub fn new(config: EmbeddingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> &str {
        self.config
            .endpoint
            .as_deref()
            .unwrap_or(OPENAI_EMBEDDINGS_URL)
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow!("OpenAI API key not configured"))?;

        let request = EmbeddingsRequest {
            model: &self.config.model,
            input: texts,
        };

        debug!("Embedding {} texts via OpenAI", texts.len());

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("OpenAI API error {}: {}", status, text));
        }

        collect_vectors(response.json().await?, texts.len())
    }

    async fn is_available(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn provider_type(&self) -> EmbeddingProvider {
        EmbeddingProvider::OpenAI
    }
}
