use std::{collections::HashMap, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{error::AppError, storage::types::text_chunk::TextChunk, utils::config::AppConfig};

/// Client for a cloud-hosted vector collection keyed by (tenant, database,
/// collection). Embeddings are computed by the store; this client only moves
/// text and metadata over HTTP.
#[derive(Clone)]
pub struct VectorStoreClient {
    http: reqwest::Client,
    base_url: String,
    tenant: String,
    database: String,
    api_key: String,
}

/// Handle to a remote collection, obtained from [`VectorStoreClient::ensure_collection`].
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionHandle {
    pub id: String,
    pub name: String,
}

/// Outcome of a best-effort batched upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub uploaded: usize,
    pub failed_batches: Vec<usize>,
}

#[derive(Serialize)]
struct EnsureCollectionRequest<'a> {
    name: &'a str,
    get_or_create: bool,
}

#[derive(Serialize)]
struct AddRecordsRequest<'a> {
    ids: Vec<&'a str>,
    documents: Vec<&'a str>,
    metadatas: Vec<HashMap<String, String>>,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query_texts: Vec<&'a str>,
    n_results: usize,
    include: Vec<&'a str>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    documents: Vec<Vec<String>>,
}

impl VectorStoreClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.chroma_base_url.trim_end_matches('/').to_string(),
            tenant: config.chroma_tenant.clone(),
            database: config.chroma_database.clone(),
            api_key: config.chroma_api_key.clone(),
        })
    }

    fn collections_url(&self) -> String {
        format!(
            "{}/api/v2/tenants/{}/databases/{}/collections",
            self.base_url, self.tenant, self.database
        )
    }

    /// Gets or creates the named collection. Idempotent.
    pub async fn ensure_collection(&self, name: &str) -> Result<CollectionHandle, AppError> {
        let response = self
            .http
            .post(self.collections_url())
            .header("X-Chroma-Token", &self.api_key)
            .json(&EnsureCollectionRequest {
                name,
                get_or_create: true,
            })
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let handle: CollectionHandle = response.json().await?;

        debug!(collection = %handle.name, id = %handle.id, "collection ready");
        Ok(handle)
    }

    /// Uploads `records` in groups of at most `batch_size`, one upsert call per
    /// group. A failed group is logged and skipped; the remaining groups are
    /// still attempted. Identifier collisions overwrite the stored record, so
    /// re-running ingestion over the same source is idempotent.
    pub async fn add_batch(
        &self,
        handle: &CollectionHandle,
        records: &[TextChunk],
        batch_size: usize,
    ) -> Result<UploadReport, AppError> {
        if batch_size == 0 {
            return Err(AppError::Validation(
                "upload batch size must be at least 1".into(),
            ));
        }

        let url = format!("{}/{}/upsert", self.collections_url(), handle.id);
        let mut report = UploadReport {
            uploaded: 0,
            failed_batches: Vec::new(),
        };

        for (batch_index, batch) in partition_batches(records, batch_size).into_iter().enumerate() {
            let payload = AddRecordsRequest {
                ids: batch.iter().map(|record| record.id.as_str()).collect(),
                documents: batch.iter().map(|record| record.text.as_str()).collect(),
                metadatas: batch.iter().map(TextChunk::metadata).collect(),
            };

            let outcome = async {
                let response = self
                    .http
                    .post(&url)
                    .header("X-Chroma-Token", &self.api_key)
                    .json(&payload)
                    .send()
                    .await?;
                Self::check_status(response).await?;
                Ok::<(), AppError>(())
            }
            .await;

            match outcome {
                Ok(()) => {
                    info!(
                        batch = batch_index,
                        records = batch.len(),
                        "uploaded batch to document store"
                    );
                    report.uploaded = report.uploaded.saturating_add(batch.len());
                }
                Err(err) => {
                    error!(batch = batch_index, error = %err, "failed to upload batch");
                    report.failed_batches.push(batch_index);
                }
            }
        }

        Ok(report)
    }

    /// Text-query similarity search. Returns up to `limit` chunk texts in the
    /// store's nearest-first order; an empty collection or no match above the
    /// store's threshold yields an empty vector, never an error.
    pub async fn query(
        &self,
        handle: &CollectionHandle,
        text: &str,
        limit: usize,
    ) -> Result<Vec<String>, AppError> {
        let url = format!("{}/{}/query", self.collections_url(), handle.id);
        let response = self
            .http
            .post(&url)
            .header("X-Chroma-Token", &self.api_key)
            .json(&QueryRequest {
                query_texts: vec![text],
                n_results: limit,
                include: vec!["documents"],
            })
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let body: QueryResponse = response.json().await?;

        // One row of results per query text; we always send exactly one.
        Ok(body.documents.into_iter().next().unwrap_or_default())
    }

    /// Folds a non-success response into a `DocumentStore` error carrying the
    /// status and body text, which the upstream classifier matches against.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::DocumentStore(format!(
            "document store returned {status}: {body}"
        )))
    }
}

/// Splits `records` into order-preserving groups of at most `batch_size`.
fn partition_batches<T>(records: &[T], batch_size: usize) -> Vec<&[T]> {
    records.chunks(batch_size.max(1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records(count: usize) -> Vec<TextChunk> {
        (0..count)
            .map(|i| TextChunk::new("test_source", i, format!("chunk {i}")))
            .collect()
    }

    #[test]
    fn test_partition_batches_group_count_and_sizes() {
        let records = sample_records(250);
        let batches = partition_batches(&records, 100);

        assert_eq!(batches.len(), 250usize.div_ceil(100));
        assert!(batches.iter().all(|batch| batch.len() <= 100));
        assert_eq!(batches[0].len(), 100);
        assert_eq!(batches[2].len(), 50);
    }

    #[test]
    fn test_partition_batches_concatenation_preserves_order() {
        let records = sample_records(7);
        let batches = partition_batches(&records, 3);

        let rejoined: Vec<&TextChunk> = batches.into_iter().flatten().collect();
        assert_eq!(rejoined.len(), records.len());
        for (original, rejoined) in records.iter().zip(rejoined) {
            assert_eq!(original, rejoined);
        }
    }

    #[test]
    fn test_partition_batches_exact_multiple() {
        let records = sample_records(200);
        let batches = partition_batches(&records, 100);
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|batch| batch.len() == 100));
    }

    #[test]
    fn test_partition_batches_empty_input() {
        let records = sample_records(0);
        assert!(partition_batches(&records, 100).is_empty());
    }

    #[test]
    fn test_query_response_parses_nested_documents() {
        let body = r#"{"ids":[["a","b"]],"documents":[["first text","second text"]]}"#;
        let parsed: QueryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.documents.len(), 1);
        assert_eq!(parsed.documents[0], vec!["first text", "second text"]);
    }

    #[test]
    fn test_query_response_tolerates_missing_documents() {
        let parsed: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.documents.is_empty());
    }
}
