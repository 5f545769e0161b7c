//! API module for the watch-time analyzer
//!
//! Provides REST API endpoints for dashboard frontends and external
//! integrations. Only compiled with the `api` feature.

use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::Config;
use crate::youtube::YouTubeClient;

pub mod handlers;
pub mod models;
pub mod server;

/// API server for handling REST requests
#[derive(Debug)]
pub struct ApiServer {
    client: Arc<YouTubeClient>,
    config: Arc<Config>,
    port: u16,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(client: Arc<YouTubeClient>, config: Arc<Config>, port: u16) -> Self {
        Self {
            client,
            config,
            port,
        }
    }

    /// Start the API server in the background
    pub fn start_background(self) -> JoinHandle<Result<()>> {
        tokio::spawn(async move { self.start().await })
    }

    /// Start the API server
    pub async fn start(self) -> Result<()> {
        info!("🚀 Starting API server on port {}", self.port);

        server::start_http_server(self.client, self.config, self.port).await
    }
}
