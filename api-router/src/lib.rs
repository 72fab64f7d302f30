use api_state::ApiState;
use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use routes::{health::health_check, query::query_docs};

pub mod api_state;
pub mod error;
mod routes;

/// Router for the query service API.
pub fn api_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    ApiState: FromRef<S>,
{
    Router::new()
        .route("/query", post(query_docs))
        .route("/health", get(health_check))
}
