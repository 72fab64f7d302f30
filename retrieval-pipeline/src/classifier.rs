use common::error::AppError;
use serde::Serialize;

/// Coarse taxonomy of upstream failures, derived from the rendered error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    RateLimit,
    ModelUnavailable,
    TokenLimit,
    AuthError,
    NetworkError,
    UnknownError,
}

/// A classified upstream failure with its fixed user-facing message. The raw
/// error text is logged, never surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedError {
    pub error_type: ErrorType,
    pub user_message: &'static str,
}

const RATE_LIMIT_MESSAGE: &str =
    "The wisdom of the Mahabharata is busy. Pause a moment and ask again.";
const MODEL_UNAVAILABLE_MESSAGE: &str =
    "The path to Mahabharata wisdom is temporarily closed. Try shortly.";
const TOKEN_LIMIT_MESSAGE: &str = "Your question is too long. Ask a shorter, clear question.";
const AUTH_ERROR_MESSAGE: &str = "The divine path is blocked. Check your API keys.";
const NETWORK_ERROR_MESSAGE: &str =
    "The path to Mahabharata knowledge is shaky. Check your internet.";
const UNKNOWN_ERROR_MESSAGE: &str = "The wisdom of the Mahabharata is hidden for now. Try again.";

/// Classifies an error by its rendered text. Deliberately heuristic: ordered
/// substring matching against known upstream failure signatures, first match
/// wins. Upstream wording changes can silently misclassify.
pub fn classify(error: &AppError) -> ClassifiedError {
    classify_text(&error.to_string())
}

pub fn classify_text(error_text: &str) -> ClassifiedError {
    let lowered = error_text.to_lowercase();

    let error_type = if lowered.contains("413") || lowered.contains("rate_limit") {
        ErrorType::RateLimit
    } else if lowered.contains("model not found") || lowered.contains("model_decommissioned") {
        ErrorType::ModelUnavailable
    } else if lowered.contains("payload too large") || lowered.contains("request too large") {
        ErrorType::TokenLimit
    } else if lowered.contains("401") || lowered.contains("unauthorized") {
        ErrorType::AuthError
    } else if lowered.contains("timeout") || lowered.contains("connection") {
        ErrorType::NetworkError
    } else {
        ErrorType::UnknownError
    };

    let user_message = match error_type {
        ErrorType::RateLimit => RATE_LIMIT_MESSAGE,
        ErrorType::ModelUnavailable => MODEL_UNAVAILABLE_MESSAGE,
        ErrorType::TokenLimit => TOKEN_LIMIT_MESSAGE,
        ErrorType::AuthError => AUTH_ERROR_MESSAGE,
        ErrorType::NetworkError => NETWORK_ERROR_MESSAGE,
        ErrorType::UnknownError => UNKNOWN_ERROR_MESSAGE,
    };

    ClassifiedError {
        error_type,
        user_message,
    }
}
