use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An out-of-band credential the pipeline needs before calling a remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    Firecrawl,
    Gemini,
}

impl Credential {
    pub fn env_var(self) -> &'static str {
        match self {
            Credential::Firecrawl => "FIRECRAWL_API_KEY",
            Credential::Gemini => "GOOGLE_GEMINI_API_KEY",
        }
    }

    fn service_name(self) -> &'static str {
        match self {
            Credential::Firecrawl => "Firecrawl",
            Credential::Gemini => "Google Gemini",
        }
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_var())
    }
}

/// Field of the generated result that failed schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaField {
    LinkedinPosts,
    TwitterThreads,
    MetaDescription,
    YoutubeTitle,
    YoutubeDescription,
}

impl fmt::Display for SchemaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SchemaField::LinkedinPosts => "Invalid LinkedIn posts structure",
            SchemaField::TwitterThreads => "Invalid Twitter threads structure",
            SchemaField::MetaDescription => "Invalid meta description (must be string under 160 chars)",
            SchemaField::YoutubeTitle => "Invalid YouTube title (must be string under 80 chars)",
            SchemaField::YoutubeDescription => "Invalid YouTube description",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("URL is required and must be a string")]
    MissingUrl,

    #[error("Invalid URL format")]
    InvalidUrl,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0} is not configured")]
    ConfigurationMissing(Credential),

    #[error("Content extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("AI generation failed: {0}")]
    GenerationFailed(String),

    #[error("AI generation failed: {0}")]
    SchemaViolation(SchemaField),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingUrl
            | AppError::InvalidUrl
            | AppError::InvalidBody(_)
            | AppError::ExtractionFailed(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigurationMissing(_)
            | AppError::GenerationFailed(_)
            | AppError::SchemaViolation(_)
            | AppError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The single message shown to the caller. Extraction reasons stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ConfigurationMissing(credential) => format!(
                "{} API key is not configured. Please add {} to environment variables.",
                credential.service_name(),
                credential.env_var()
            ),
            AppError::ExtractionFailed(_) => "Could not extract content from the provided URL. \
                Please ensure it is a valid blog post URL and that the site allows scraping."
                .to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        crate::api::response::error(&self).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
