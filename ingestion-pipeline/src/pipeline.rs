use std::{path::Path, sync::Arc};

use common::{
    error::AppError,
    storage::{
        types::text_chunk::TextChunk,
        vector_store::{CollectionHandle, VectorStoreClient},
    },
    utils::config::AppConfig,
};
use tracing::{info, warn};

use crate::{chunking::chunk_text, utils::pdf_text_extraction::extract_pdf_text};

/// Offline ingestion job: extract → chunk → batch upload. Constructed once
/// with a ready collection handle and shared read-only thereafter.
pub struct IngestionPipeline {
    store: Arc<VectorStoreClient>,
    collection: CollectionHandle,
    config: AppConfig,
}

/// Final ingestion outcome. `batches_failed` holds the indices of upload
/// batches that errored; those records are absent from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub documents_indexed: usize,
    pub batches_failed: Vec<usize>,
}

impl IngestionPipeline {
    pub fn new(store: Arc<VectorStoreClient>, collection: CollectionHandle, config: AppConfig) -> Self {
        Self {
            store,
            collection,
            config,
        }
    }

    /// Ingests one PDF into the document store. Empty extraction aborts before
    /// any upload; per-batch upload failures are collected, not fatal.
    pub async fn ingest(&self, path: &Path, source_id: &str) -> Result<IngestReport, AppError> {
        let text = extract_pdf_text(path).await?;
        info!(
            source = source_id,
            chars = text.len(),
            "extracted text from document"
        );

        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "no text extracted from document; check file integrity or encoding".into(),
            ));
        }

        let chunks = chunk_text(&text, self.config.chunk_size, self.config.chunk_overlap)?;
        let records = build_records(chunks, source_id);
        info!(
            source = source_id,
            chunks = records.len(),
            "prepared chunks for upload"
        );

        let upload = self
            .store
            .add_batch(&self.collection, &records, self.config.upload_batch_size)
            .await?;

        if upload.failed_batches.is_empty() {
            info!(
                source = source_id,
                uploaded = upload.uploaded,
                "ingestion complete"
            );
        } else {
            warn!(
                source = source_id,
                uploaded = upload.uploaded,
                failed_batches = upload.failed_batches.len(),
                "ingestion finished with failed batches"
            );
        }

        Ok(IngestReport {
            documents_indexed: upload.uploaded,
            batches_failed: upload.failed_batches,
        })
    }
}

/// Assigns sequential identifiers and source metadata to the chunk texts.
fn build_records(chunks: Vec<String>, source_id: &str) -> Vec<TextChunk> {
    chunks
        .into_iter()
        .enumerate()
        .map(|(index, text)| TextChunk::new(source_id, index, text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_records_assigns_sequential_ids() {
        let chunks = vec!["first".to_string(), "second".to_string(), "third".to_string()];
        let records = build_records(chunks, "mahabharata_pdf");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "mahabharata_pdf_0");
        assert_eq!(records[1].id, "mahabharata_pdf_1");
        assert_eq!(records[2].id, "mahabharata_pdf_2");
        assert_eq!(records[1].text, "second");
        for record in &records {
            assert_eq!(
                record.metadata().get("source"),
                Some(&"mahabharata_pdf".to_string())
            );
        }
    }

    #[test]
    fn test_build_records_empty_input() {
        assert!(build_records(Vec::new(), "src").is_empty());
    }
}
