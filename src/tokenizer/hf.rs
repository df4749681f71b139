/// Multilingual tokenizer wrapper around HuggingFace `tokenizers` crate.
///
/// Sub-word pieces are merged back into words using the encoding's word ids
/// and byte offsets, so the output is a list of surface words rather than
/// vocabulary pieces.
use std::path::Path;

use tokenizers::Tokenizer;
use tracing::info;

use super::{TokenizerError, TokenizerModel};

/// Word-level tokenizer backed by a `tokenizer.json` model.
pub struct HfTokenizer {
    inner: Tokenizer,
}

impl HfTokenizer {
    /// Load a tokenizer from a `tokenizer.json` file in the model directory.
    pub fn from_model_dir(model_dir: &Path) -> Result<Self, TokenizerError> {
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !tokenizer_path.exists() {
            return Err(TokenizerError::ModelLoad(format!(
                "tokenizer.json not found in {}",
                model_dir.display()
            )));
        }

        info!("Loading multilingual tokenizer from {}", model_dir.display());

        let mut inner = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TokenizerError::ModelLoad(format!("failed to load tokenizer: {e}")))?;

        // Whole documents are tokenized, never padded or cut.
        inner.with_padding(None);
        inner
            .with_truncation(None)
            .map_err(|e| TokenizerError::ModelLoad(format!("truncation config error: {e}")))?;

        info!(
            "Multilingual tokenizer loaded (vocab size: {})",
            inner.get_vocab_size(false)
        );

        Ok(Self { inner })
    }
}

impl TokenizerModel for HfTokenizer {
    fn name(&self) -> &str {
        "multilingual"
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| TokenizerError::Encode(format!("failed to encode text: {e}")))?;

        let spans = word_spans(encoding.get_word_ids(), encoding.get_offsets());
        Ok(spans
            .into_iter()
            .filter_map(|(start, end)| text.get(start..end))
            .map(|word| word.trim().to_string())
            .collect())
    }
}

/// Merge per-piece byte offsets into one span per word id.
///
/// Pieces without a word id (special tokens) are skipped.
fn word_spans(word_ids: &[Option<u32>], offsets: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut current: Option<u32> = None;

    for (word_id, &(start, end)) in word_ids.iter().zip(offsets) {
        let Some(id) = *word_id else {
            current = None;
            continue;
        };

        match spans.last_mut() {
            Some(span) if current == Some(id) => {
                span.0 = span.0.min(start);
                span.1 = span.1.max(end);
            }
            _ => spans.push((start, end)),
        }
        current = Some(id);
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_spans_merges_pieces() {
        // "tokenization rocks" -> token ##ization rocks
        let ids = [Some(0), Some(0), Some(1)];
        let offsets = [(0, 5), (5, 12), (13, 18)];
        assert_eq!(word_spans(&ids, &offsets), vec![(0, 12), (13, 18)]);
    }

    #[test]
    fn test_word_spans_skips_special() {
        let ids = [None, Some(0), Some(1), None];
        let offsets = [(0, 0), (0, 5), (5, 6), (0, 0)];
        assert_eq!(word_spans(&ids, &offsets), vec![(0, 5), (5, 6)]);
    }

    #[test]
    fn test_word_spans_empty() {
        assert!(word_spans(&[], &[]).is_empty());
    }

    #[test]
    fn test_tokenizer_missing_file() {
        let result = HfTokenizer::from_model_dir(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(TokenizerError::ModelLoad(_))));
    }

    /// This test requires the actual tokenizer.json file.
    /// Run with: cargo test hf -- --ignored
    #[test]
    #[ignore]
    fn test_tokenize_with_real_model() {
        let model_dir = Path::new("models/bert-base-multilingual-cased");
        if !model_dir.join("tokenizer.json").exists() {
            eprintln!("Skipping: model files not downloaded");
            return;
        }

        let tokenizer = HfTokenizer::from_model_dir(model_dir).unwrap();
        let tokens = tokenizer.tokenize("Tokenization works, really!").unwrap();

        assert_eq!(tokens, vec!["Tokenization", "works", ",", "really", "!"]);
    }
}
