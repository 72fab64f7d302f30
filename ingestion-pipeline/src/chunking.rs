use common::error::AppError;
use text_splitter::{ChunkConfig, TextSplitter};

/// Splits `text` into chunks of at most `max_size` characters, with
/// consecutive chunks sharing `overlap` characters. Splitting prefers natural
/// boundaries (paragraph, sentence, word) and falls back to a hard character
/// cut. Trimming is disabled so the chunks cover every character of the input.
pub fn chunk_text(text: &str, max_size: usize, overlap: usize) -> Result<Vec<String>, AppError> {
    if max_size == 0 {
        return Err(AppError::Validation("chunk size must be at least 1".into()));
    }

    if overlap >= max_size {
        return Err(AppError::Validation(format!(
            "chunk overlap of {overlap} must be smaller than the chunk size of {max_size}"
        )));
    }

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let chunk_config = ChunkConfig::new(max_size)
        .with_overlap(overlap)
        .map_err(|e| AppError::Validation(format!("invalid chunk overlap: {e}")))?
        .with_trim(false);
    let splitter = TextSplitter::new(chunk_config);

    Ok(splitter.chunks(text).map(str::to_owned).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> String {
        let mut text = String::new();
        for paragraph in 0..12 {
            for sentence in 0..8 {
                text.push_str(&format!(
                    "Paragraph {paragraph} sentence {sentence} recounts one episode of the great war. "
                ));
            }
            text.push_str("\n\n");
        }
        text
    }

    /// Walks the chunks through the source text, asserting there is no gap
    /// between consecutive chunks and that the final chunk reaches the end.
    fn assert_full_coverage(text: &str, chunks: &[String]) {
        let mut covered_until = 0usize;
        let mut search_from = 0usize;

        for chunk in chunks {
            let start = text[search_from..]
                .find(chunk.as_str())
                .map(|offset| offset + search_from)
                .unwrap_or_else(|| panic!("chunk is not a substring of the source"));
            assert!(
                start <= covered_until,
                "gap in coverage before offset {start}"
            );
            covered_until = covered_until.max(start + chunk.len());
            search_from = start + 1;
        }

        assert_eq!(covered_until, text.len(), "source text not fully covered");
    }

    #[test]
    fn test_chunks_respect_max_size_and_cover_source() {
        let text = sample_document();
        let chunks = chunk_text(&text, 500, 50).unwrap();

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|chunk| chunk.chars().count() <= 500));
        assert_full_coverage(&text, &chunks);
    }

    #[test]
    fn test_hard_cut_chunks_share_overlap() {
        // No paragraph, sentence, or word boundaries: forces the character cut
        // fallback, where the overlap is exact.
        let text = "0123456789".repeat(120);
        let chunks = chunk_text(&text, 500, 50).unwrap();

        assert!(chunks.len() > 1);
        for window in chunks.windows(2) {
            let (previous, next) = (&window[0], &window[1]);
            let tail = &previous[previous.len() - 50..];
            assert!(next.starts_with(tail), "adjacent chunks share no trailing text");
        }
    }

    #[test]
    fn test_short_text_is_a_single_chunk() {
        let text = "Yudhishthira never uttered a falsehood.";
        let chunks = chunk_text(text, 500, 50).unwrap();
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(chunk_text("", 500, 50).unwrap().is_empty());
        assert!(chunk_text("   \n\t  ", 500, 50).unwrap().is_empty());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_size() {
        assert!(matches!(
            chunk_text("some text", 50, 50),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            chunk_text("some text", 50, 80),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            chunk_text("some text", 0, 0),
            Err(AppError::Validation(_))
        ));
    }
}
