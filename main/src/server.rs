use std::sync::Arc;

use api_router::{api_routes, api_state::ApiState};
use axum::Router;
use common::{
    storage::vector_store::VectorStoreClient,
    utils::config::get_config,
};
use retrieval_pipeline::{completion::CompletionClient, QueryPipeline, StoreContextSource};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    // Get config; missing credentials abort startup here.
    let config = get_config()?;

    // Store client and collection handle are created once and shared
    // read-only across requests.
    let store = Arc::new(VectorStoreClient::new(&config)?);
    let collection = store.ensure_collection(&config.chroma_collection).await?;
    info!(collection = %collection.name, "document store collection ready");

    let context = Arc::new(StoreContextSource::new(store, collection));
    let completion = Arc::new(CompletionClient::new(&config)?);
    let pipeline = Arc::new(QueryPipeline::new(context, completion));

    let api_state = ApiState { pipeline };

    // Permissive CORS, matching the intentionally open surface.
    let app = Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .with_state(api_state);

    info!("Starting server listening on 0.0.0.0:{}", config.http_port);
    let serve_address = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(serve_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
