use thiserror::Error;
use tokio::task::JoinError;

// Core internal errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Document store error: {0}")]
    DocumentStore(String),
    #[error("Completion API error: {0}")]
    Completion(String),
    #[error("LLM parsing error: {0}")]
    LLMParsing(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Ingestion processing error: {0}")]
    Processing(String),
    #[error("Task join error: {0}")]
    Join(#[from] JoinError),
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
    #[error("Reqwest error: {0}")]
    Reqwest(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest renders transport errors without their source chain, so a
        // timeout or refused connection would otherwise surface as an opaque
        // "error sending request" string. Tag the failure class explicitly and
        // append the cause chain so downstream classification sees it.
        let rendered = if err.is_timeout() {
            format!("request timeout: {}", render_with_sources(&err))
        } else if err.is_connect() {
            format!("connection error: {}", render_with_sources(&err))
        } else {
            render_with_sources(&err)
        };

        Self::Reqwest(rendered)
    }
}

fn render_with_sources(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_transport_timeout_renders_with_timeout_signature() {
        // A listener that accepts the TCP connection but never responds.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let err = client
            .get(format!("http://{addr}/"))
            .send()
            .await
            .unwrap_err();
        assert!(err.is_timeout());

        let app_error = AppError::from(err);
        assert!(app_error.to_string().to_lowercase().contains("timeout"));
    }

    #[tokio::test]
    async fn test_refused_connection_renders_with_connection_signature() {
        // Bind to grab a free port, then drop the listener so connecting fails.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = reqwest::Client::new()
            .get(format!("http://{addr}/"))
            .send()
            .await
            .unwrap_err();

        let app_error = AppError::from(err);
        assert!(app_error.to_string().to_lowercase().contains("connection"));
    }
}
