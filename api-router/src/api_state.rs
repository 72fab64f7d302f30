use std::sync::Arc;

use retrieval_pipeline::QueryPipeline;

/// Shared state for the query service: built once at startup, read-only per
/// request, never torn down during normal operation.
#[derive(Clone)]
pub struct ApiState {
    pub pipeline: Arc<QueryPipeline>,
}
