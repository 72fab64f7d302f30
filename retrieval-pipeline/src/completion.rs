use std::time::Duration;

use common::{
    error::AppError,
    storage::types::answer::{StructuredAnswer, EXPECTED_FOLLOWUP_QUESTIONS},
    utils::config::AppConfig,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const TEMPERATURE: f32 = 0.4;
const MAX_TOKENS: u32 = 1024;

/// System prompt pinning the model to the Mahabharata persona and to the
/// JSON-only response contract.
pub fn render_prompt(context: &str, user_query: &str) -> String {
    format!(
        r#"You are Mahabharata-GPT, a divine chatbot that answers only about Mahabharata.

Context:
{context}

Question:
{user_query}

Respond in JSON format ONLY with the following fields:
{{
  "who": "<Brief description of the person/event in Mahabharata>",
  "lesson": "<Key habits or principles one can learn from this character/event, actionable advice>",
  "followup_questions": ["<Q1>", "<Q2>", "<Q3>"]
}}

Requirements:
- Use Mahabharata language and tone.
- Keep answers concise, clear, and educational.
- Do NOT answer anything outside Mahabharata.
"#
    )
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Client for the external chat-completions API. One synchronous attempt per
/// call: no streaming, no retries, explicit timeout.
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.perplexity_base_url.trim_end_matches('/').to_string(),
            api_key: config.perplexity_api_key.clone(),
            model: config.completion_model.clone(),
        })
    }

    /// Sends the rendered prompt as the system message and the raw user query
    /// as the user message, returning the first choice's content string.
    pub async fn complete(&self, system_prompt: &str, user_query: &str) -> Result<String, AppError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_query,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Completion(format!(
                "completion API returned {status}: {body}"
            )));
        }

        let body = response.text().await?;
        let content = extract_content(&body)?;

        debug!(chars = content.len(), "received completion content");
        Ok(content)
    }
}

/// First parse stage: the outer wire envelope. Transport-level malformation
/// surfaces here, distinct from malformed model output.
fn extract_content(body: &str) -> Result<String, AppError> {
    let envelope: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| AppError::LLMParsing(format!("malformed completion envelope: {e}")))?;

    envelope
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| AppError::LLMParsing("no choices in completion response".into()))
}

/// Second parse stage: the model is instructed to return JSON as text, so the
/// content string is parsed again into the structured answer.
pub fn parse_structured_answer(content: &str) -> Result<StructuredAnswer, AppError> {
    let answer: StructuredAnswer = serde_json::from_str(content).map_err(|e| {
        AppError::LLMParsing(format!("model content is not a structured answer: {e}"))
    })?;

    if answer.followup_questions.len() != EXPECTED_FOLLOWUP_QUESTIONS {
        warn!(
            count = answer.followup_questions.len(),
            "model returned an unexpected number of follow-up questions"
        );
    }

    Ok(answer)
}
