use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A bounded slice of source text, the unit of indexing and retrieval.
/// Immutable once created; identity is `"{source_id}_{sequence_index}"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextChunk {
    pub id: String,
    pub text: String,
    pub source_id: String,
    pub sequence_index: usize,
}

impl TextChunk {
    pub fn new(source_id: &str, sequence_index: usize, text: String) -> Self {
        Self {
            id: format!("{source_id}_{sequence_index}"),
            text,
            source_id: source_id.to_string(),
            sequence_index,
        }
    }

    /// Metadata stored alongside the chunk in the document store.
    pub fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([("source".to_string(), self.source_id.clone())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_combines_source_and_index() {
        let chunk = TextChunk::new("mahabharata_pdf", 7, "Bhishma's vow".to_string());

        assert_eq!(chunk.id, "mahabharata_pdf_7");
        assert_eq!(chunk.source_id, "mahabharata_pdf");
        assert_eq!(chunk.sequence_index, 7);
        assert_eq!(chunk.text, "Bhishma's vow");
    }

    #[test]
    fn test_metadata_carries_source() {
        let chunk = TextChunk::new("mahabharata_pdf", 0, "text".to_string());
        let metadata = chunk.metadata();

        assert_eq!(metadata.len(), 1);
        assert_eq!(
            metadata.get("source"),
            Some(&"mahabharata_pdf".to_string())
        );
    }

    #[test]
    fn test_identities_unique_within_source() {
        let a = TextChunk::new("src", 0, "a".to_string());
        let b = TextChunk::new("src", 1, "b".to_string());
        assert_ne!(a.id, b.id);
    }
}
