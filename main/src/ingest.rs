use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use common::{storage::vector_store::VectorStoreClient, utils::config::get_config};
use ingestion_pipeline::IngestionPipeline;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Offline ingestion job: chunks one PDF and uploads it to the document store.
#[derive(Parser, Debug)]
struct Args {
    /// Path to the PDF document to ingest
    #[arg(long)]
    file: PathBuf,

    /// Logical source name used for chunk identifiers and metadata
    #[arg(long, default_value = "mahabharata_pdf")]
    source: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let args = Args::parse();

    // Get config; missing credentials abort before anything is uploaded.
    let config = get_config()?;

    let store = Arc::new(VectorStoreClient::new(&config)?);
    let collection = store.ensure_collection(&config.chroma_collection).await?;
    info!(collection = %collection.name, "document store collection ready");

    let pipeline = IngestionPipeline::new(store, collection, config);
    let report = pipeline.ingest(&args.file, &args.source).await?;

    if report.batches_failed.is_empty() {
        info!(
            documents_indexed = report.documents_indexed,
            "upload complete"
        );
    } else {
        warn!(
            documents_indexed = report.documents_indexed,
            failed_batches = ?report.batches_failed,
            "upload finished with failed batches"
        );
    }

    Ok(())
}
