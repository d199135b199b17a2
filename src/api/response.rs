use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;
use crate::error::{AppError, ErrorResponse};

/// A 200 whose body is exactly `data`, with no envelope.
pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn error(err: &AppError) -> (StatusCode, Json<ErrorResponse>) {
    (
        err.status(),
        Json(ErrorResponse {
            error: err.public_message(),
        }),
    )
}
