use serde::{Deserialize, Serialize};
use reqwest::Client;
use crate::error::{Result, AppError};

/// Decoding parameters sent with every generation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    // Tuned for varied wording across the three variants of each platform
    fn default() -> Self {
        GenerationConfig {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

pub async fn call_gemini(
    client: &Client,
    base_url: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
    generation_config: GenerationConfig,
) -> Result<String> {
    let url = format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    );
    let body = GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part { text: prompt }],
        }],
        generation_config,
    };

    let res = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| AppError::GenerationFailed(format!("Gemini request failed: {}", e.without_url())))?;

    let status = res.status();
    if !status.is_success() {
        let error_text = res.text().await.unwrap_or_default();
        return Err(AppError::GenerationFailed(format!("Gemini API error ({}): {}", status, error_text)));
    }

    let json: GenerateContentResponse = res
        .json()
        .await
        .map_err(|e| AppError::GenerationFailed(format!("Invalid response format from Gemini: {}", e.without_url())))?;

    if let Some(err) = json.error {
        return Err(AppError::GenerationFailed(format!("Gemini API error: {}", err.message)));
    }

    let reply: String = json
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if reply.trim().is_empty() {
        return Err(AppError::GenerationFailed("Gemini returned an empty response".to_string()));
    }

    Ok(reply)
}
