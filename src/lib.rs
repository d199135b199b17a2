pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod prompt;
pub mod scraper;

use std::sync::Arc;
use std::time::Duration;
use reqwest::{Client, ClientBuilder};
use config::Config;
use error::{AppError, Result};

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Client,
}

impl AppState {
    /// Builds the shared HTTP client used for both outbound services.
    pub fn new(config: Config) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.http_timeout)
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(AppState {
            config: Arc::new(config),
            client,
        })
    }
}
