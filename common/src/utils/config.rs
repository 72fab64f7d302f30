use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    pub chroma_api_key: String,
    pub chroma_tenant: String,
    pub perplexity_api_key: String,
    #[serde(default = "default_chroma_base_url")]
    pub chroma_base_url: String,
    #[serde(default = "default_database")]
    pub chroma_database: String,
    #[serde(default = "default_collection")]
    pub chroma_collection: String,
    #[serde(default = "default_perplexity_base_url")]
    pub perplexity_base_url: String,
    #[serde(default = "default_completion_model")]
    pub completion_model: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    #[serde(default = "default_upload_batch_size")]
    pub upload_batch_size: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_chroma_base_url() -> String {
    "https://api.trychroma.com".to_string()
}

fn default_database() -> String {
    "mahabharata".to_string()
}

fn default_collection() -> String {
    "mahabharata".to_string()
}

fn default_perplexity_base_url() -> String {
    "https://api.perplexity.ai".to_string()
}

fn default_completion_model() -> String {
    "sonar".to_string()
}

fn default_http_port() -> u16 {
    8000
}

fn default_chunk_size() -> usize {
    500
}

fn default_chunk_overlap() -> usize {
    50
}

fn default_upload_batch_size() -> usize {
    100
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Loads configuration from an optional `config` file and the environment.
/// Missing credentials surface as a deserialization error, aborting startup.
pub fn get_config() -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::default())
        .build()?;

    config.try_deserialize()
}
