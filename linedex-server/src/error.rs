use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use linedex_core::IndexError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Details stay in the log; clients only learn that the read failed
        tracing::error!("request failed: {}", self);
        let body = json!({ "error": "Internal Server Error" });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
