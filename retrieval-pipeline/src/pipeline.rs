use std::sync::Arc;

use async_trait::async_trait;
use common::{
    error::AppError,
    storage::{
        types::answer::StructuredAnswer,
        vector_store::{CollectionHandle, VectorStoreClient},
    },
};
use tracing::{error, info};

use crate::{
    classifier::{classify, ClassifiedError},
    completion::{parse_structured_answer, render_prompt, CompletionClient},
};

/// Source of retrieved context for a query. Seam for the document store so the
/// pipeline can be exercised without a live collection.
#[async_trait]
pub trait ContextSource: Send + Sync {
    async fn retrieve(&self, query: &str, limit: usize) -> Result<Vec<String>, AppError>;
}

/// Backend that turns a rendered prompt and user query into raw model content.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_query: &str) -> Result<String, AppError>;
}

/// A vector store client bound to one collection handle.
pub struct StoreContextSource {
    store: Arc<VectorStoreClient>,
    collection: CollectionHandle,
}

impl StoreContextSource {
    pub fn new(store: Arc<VectorStoreClient>, collection: CollectionHandle) -> Self {
        Self { store, collection }
    }
}

#[async_trait]
impl ContextSource for StoreContextSource {
    async fn retrieve(&self, query: &str, limit: usize) -> Result<Vec<String>, AppError> {
        self.store.query(&self.collection, query, limit).await
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, system_prompt: &str, user_query: &str) -> Result<String, AppError> {
        CompletionClient::complete(self, system_prompt, user_query).await
    }
}

/// Outcome of one query attempt. `NoContext` is a valid empty-answer result,
/// not an error; the completion API is never invoked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Answer(StructuredAnswer),
    NoContext,
}

/// Per-request RAG pipeline: retrieve → assemble prompt → complete → parse.
/// Holds no request-to-request state; a single failed attempt is classified
/// and surfaced, never retried.
pub struct QueryPipeline {
    context: Arc<dyn ContextSource>,
    completion: Arc<dyn CompletionBackend>,
}

impl QueryPipeline {
    pub fn new(context: Arc<dyn ContextSource>, completion: Arc<dyn CompletionBackend>) -> Self {
        Self {
            context,
            completion,
        }
    }

    /// Answers one query. All internal failures are routed through the
    /// classifier; raw errors never escape this boundary.
    pub async fn answer(
        &self,
        query: &str,
        n_results: usize,
    ) -> Result<QueryOutcome, ClassifiedError> {
        match self.try_answer(query, n_results).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                let classified = classify(&err);
                error!(
                    error = %err,
                    error_type = ?classified.error_type,
                    "query pipeline failure"
                );
                Err(classified)
            }
        }
    }

    async fn try_answer(&self, query: &str, n_results: usize) -> Result<QueryOutcome, AppError> {
        let documents = self.context.retrieve(query, n_results).await?;
        if documents.is_empty() {
            info!("no relevant context retrieved for query");
            return Ok(QueryOutcome::NoContext);
        }

        // Context joined in store-returned (nearest-first) order.
        let context = documents.join("\n\n");
        let prompt = render_prompt(&context, query);

        let content = self.completion.complete(&prompt, query).await?;
        let answer = parse_structured_answer(&content)?;

        Ok(QueryOutcome::Answer(answer))
    }
}
