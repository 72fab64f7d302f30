use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Health probe: returns 200 while the process is serving.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "message": "Mahabharata RAG service is running"
        })),
    )
}
