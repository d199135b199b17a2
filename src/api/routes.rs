use axum::{
    body::Bytes,
    routing::{get, post},
    Router,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use tower_http::cors::{CorsLayer, Any};
use tracing::{error, info, warn};

use crate::error::{Result, AppError};
use crate::api::models::{RepurposeRequest, RepurposedContent};
use crate::api::response;
use crate::generator::generate;
use crate::scraper::extract_content;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/repurpose", post(repurpose_handler))
        .route("/api/health", get(health_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn health_handler() -> impl IntoResponse {
    response::success(json!({ "status": "ok" }))
}

async fn repurpose_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    let start_time = std::time::Instant::now();

    // Parsed by hand so a missing Content-Type header is not an error
    let result = match serde_json::from_slice::<Value>(&body) {
        Ok(body) => process_repurpose_request(&state, RepurposeRequest::from(body)).await,
        Err(e) => Err(AppError::InvalidBody(e.to_string())),
    };

    let elapsed = start_time.elapsed();
    match result {
        Ok(content) => {
            info!(?elapsed, "Repurpose request succeeded");
            response::success(content).into_response()
        }
        Err(err) => {
            if err.status().is_server_error() {
                error!(?elapsed, error = %err, "Repurpose request failed");
            } else {
                warn!(?elapsed, error = %err, "Repurpose request rejected");
            }
            err.into_response()
        }
    }
}

/// Validate, extract, generate. Stops at the first failure.
async fn process_repurpose_request(state: &AppState, req: RepurposeRequest) -> Result<RepurposedContent> {
    let url = req.validated_url()?;

    // Both credentials are checked before either service is called
    state.config.firecrawl_key()?;
    state.config.gemini_key()?;
    info!(%url, "Processing URL");

    let content = extract_content(&state.client, &state.config, url.as_str()).await?;
    info!(chars = content.char_count(), "Content extracted");

    generate(state, &content.text).await
}
