use serde::Serialize;
use serde_json::Value;
use url::Url;
use crate::error::{AppError, Result};

/// Inbound body. `url` stays untyped so a wrong type is reported as a client error.
#[derive(Debug)]
pub struct RepurposeRequest {
    pub url: Option<Value>,
}

impl From<Value> for RepurposeRequest {
    fn from(body: Value) -> Self {
        let url = match body {
            Value::Object(mut fields) => fields.remove("url"),
            _ => None,
        };
        RepurposeRequest { url }
    }
}

impl RepurposeRequest {
    /// Returns the absolute http(s) URL the caller asked for.
    pub fn validated_url(&self) -> Result<Url> {
        let raw = match &self.url {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim(),
            _ => return Err(AppError::MissingUrl),
        };

        let url = Url::parse(raw).map_err(|_| AppError::InvalidUrl)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(AppError::InvalidUrl),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepurposedContent {
    /// Educational, controversial and personal-story angles, in that order.
    pub linkedin_posts: [String; 3],
    /// Pattern-interrupt, curiosity-gap and mistake-framework hooks.
    pub twitter_threads: [String; 3],
    pub meta_description: String,
    pub youtube_title: String,
    pub youtube_description: String,
}
