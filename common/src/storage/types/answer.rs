use serde::{Deserialize, Serialize};

/// Number of follow-up questions the prompt asks the model for. This is a
/// prompt-level contract, not locally enforced; a mismatch is only logged.
pub const EXPECTED_FOLLOWUP_QUESTIONS: usize = 3;

/// The structured answer the completion model is instructed to return.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructuredAnswer {
    pub who: String,
    pub lesson: String,
    pub followup_questions: Vec<String>,
}
