use axum::{extract::State, response::IntoResponse, Json};
use retrieval_pipeline::QueryOutcome;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{api_state::ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct QueryInput {
    query: String,
    #[serde(default = "default_n_results")]
    n_results: usize,
}

fn default_n_results() -> usize {
    3
}

pub async fn query_docs(
    State(state): State<ApiState>,
    Json(input): Json<QueryInput>,
) -> Result<impl IntoResponse, ApiError> {
    if input.n_results < 1 {
        return Err(ApiError::Validation(
            "n_results must be at least 1".to_string(),
        ));
    }

    info!(
        query_chars = input.query.len(),
        n_results = input.n_results,
        "received query"
    );

    match state.pipeline.answer(&input.query, input.n_results).await {
        Ok(QueryOutcome::Answer(answer)) => Ok(Json(answer).into_response()),
        Ok(QueryOutcome::NoContext) => Ok(Json(json!({
            "error": "No relevant information found in the Mahabharata knowledge base."
        }))
        .into_response()),
        Err(classified) => Err(ApiError::Pipeline(classified)),
    }
}
