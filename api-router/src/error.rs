use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use retrieval_pipeline::classifier::ClassifiedError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Pipeline error: {}", .0.user_message)]
    Pipeline(ClassifiedError),
}

#[derive(Serialize, Debug)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            // Only the fixed classified message leaves the service; the raw
            // upstream error text was already logged at the pipeline boundary.
            Self::Pipeline(classified) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                classified.user_message.to_string(),
            ),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
