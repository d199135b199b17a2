use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::config::Config;
use crate::error::{AppError, Result};

/// Upper bound on extracted text handed to the prompt, in characters.
pub const MAX_CONTENT_CHARS: usize = 3500;

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'a str; 1],
}

#[derive(Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    data: Option<ScrapeData>,
}

#[derive(Deserialize)]
struct ScrapeData {
    markdown: Option<String>,
}

#[derive(Deserialize)]
struct ScrapeErrorBody {
    error: Option<String>,
}

/// Article text as returned by the extraction service, already truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub text: String,
}

impl ExtractedContent {
    pub fn new(raw: &str) -> Self {
        ExtractedContent {
            text: truncate_content(raw, MAX_CONTENT_CHARS),
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Hard cut at `max_chars`, with no regard for word or sentence boundaries.
pub fn truncate_content(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Fetches a markdown rendering of `url` through Firecrawl.
pub async fn extract_content(client: &Client, config: &Config, url: &str) -> Result<ExtractedContent> {
    let api_key = config.firecrawl_key()?;
    let endpoint = format!("{}/scrape", config.firecrawl_api_url.trim_end_matches('/'));

    let response = client
        .post(&endpoint)
        .bearer_auth(api_key)
        .json(&ScrapeRequest { url, formats: ["markdown"] })
        .send()
        .await
        .map_err(|e| AppError::ExtractionFailed(format!("Firecrawl request failed: {}", e.without_url())))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let reason = serde_json::from_str::<ScrapeErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| "Failed to extract content".to_string());
        warn!(%status, %reason, "Firecrawl returned an error");
        return Err(AppError::ExtractionFailed(format!("Firecrawl error: {}", reason)));
    }

    let payload: ScrapeResponse = response
        .json()
        .await
        .map_err(|e| AppError::ExtractionFailed(format!("Invalid response from Firecrawl: {}", e.without_url())))?;

    let success = payload.success;
    let markdown = payload
        .data
        .and_then(|data| data.markdown)
        .filter(|markdown| success && !markdown.is_empty())
        .ok_or_else(|| AppError::ExtractionFailed("Could not extract content from the provided URL".to_string()))?;

    let content = ExtractedContent::new(&markdown);
    debug!(raw_chars = markdown.chars().count(), kept_chars = content.char_count(), "Extracted article content");
    Ok(content)
}
