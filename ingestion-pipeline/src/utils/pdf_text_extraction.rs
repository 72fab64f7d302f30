use std::path::Path;

use common::error::AppError;
use tracing::debug;

/// Extracts the text layer from a PDF, keeping the parsing work off the async
/// executor. Image-only pages contribute nothing; the caller decides whether an
/// empty result is fatal.
pub async fn extract_pdf_text(path: &Path) -> Result<String, AppError> {
    let pdf_bytes = tokio::fs::read(path).await?;

    let text = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&pdf_bytes).map(|s| s.trim().to_string())
    })
    .await?
    .map_err(|err| AppError::Processing(format!("Failed to extract text from PDF: {err}")))?;

    debug!(chars = text.len(), "extracted PDF text layer");

    Ok(text)
}
