use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Credential, Result};

pub const DEFAULT_FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub firecrawl_api_key: Option<String>,
    pub firecrawl_api_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        // Credentials are checked per request, so the server still starts without them
        let firecrawl_api_key = non_empty_var(Credential::Firecrawl.env_var());
        let gemini_api_key = non_empty_var(Credential::Gemini.env_var());

        let firecrawl_api_url = non_empty_var("FIRECRAWL_API_URL")
            .unwrap_or_else(|| DEFAULT_FIRECRAWL_API_URL.to_string());
        let gemini_api_url = non_empty_var("GEMINI_API_URL")
            .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string());
        let gemini_model = non_empty_var("GEMINI_MODEL")
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let timeout = env::var("HTTP_TIMEOUT_SECS").unwrap_or_else(|_| "60".to_string());
        let timeout = timeout.parse::<u64>().map_err(|e| AppError::InvalidConfig(format!("Invalid HTTP_TIMEOUT_SECS: {}", e)))?;

        // Load server configuration with defaults
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::InvalidConfig(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::InvalidConfig(format!("Invalid host address: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            firecrawl_api_key,
            firecrawl_api_url,
            gemini_api_key,
            gemini_api_url,
            gemini_model,
            http_timeout: Duration::from_secs(timeout),
        })
    }

    pub fn firecrawl_key(&self) -> Result<&str> {
        self.firecrawl_api_key
            .as_deref()
            .ok_or(AppError::ConfigurationMissing(Credential::Firecrawl))
    }

    pub fn gemini_key(&self) -> Result<&str> {
        self.gemini_api_key
            .as_deref()
            .ok_or(AppError::ConfigurationMissing(Credential::Gemini))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            firecrawl_api_key: None,
            firecrawl_api_url: DEFAULT_FIRECRAWL_API_URL.to_string(),
            gemini_api_key: None,
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            http_timeout: Duration::from_secs(60),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_surface_as_configuration_errors() {
        let config = Config::default();
        assert!(matches!(
            config.firecrawl_key(),
            Err(AppError::ConfigurationMissing(Credential::Firecrawl))
        ));
        assert!(matches!(
            config.gemini_key(),
            Err(AppError::ConfigurationMissing(Credential::Gemini))
        ));
    }

    #[test]
    fn present_keys_are_returned() {
        let config = Config {
            firecrawl_api_key: Some("fc-key".into()),
            gemini_api_key: Some("gm-key".into()),
            ..Config::default()
        };
        assert_eq!(config.firecrawl_key().unwrap(), "fc-key");
        assert_eq!(config.gemini_key().unwrap(), "gm-key");
    }
}
