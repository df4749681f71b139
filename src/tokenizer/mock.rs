/// Mock tokenizer for testing purposes.
///
/// Splits on whitespace and peels leading/trailing ASCII and CJK punctuation
/// into their own tokens, so filtering can be exercised without loading a
/// real model. Can be told to fail, and counts its calls.
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{TokenizerError, TokenizerModel};

/// A deterministic whitespace tokenizer.
pub struct MockTokenizer {
    name: String,
    fail: bool,
    calls: AtomicUsize,
}

impl MockTokenizer {
    /// Create a working mock with the given backend name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock whose every call fails.
    #[must_use]
    pub fn failing(name: &str) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    /// Number of `tokenize` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockTokenizer {
    fn default() -> Self {
        Self::new("mock")
    }
}

impl TokenizerModel for MockTokenizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(TokenizerError::Mock(format!("{} configured to fail", self.name)));
        }

        let mut tokens = Vec::new();
        for word in text.split_whitespace() {
            split_edge_punctuation(word, &mut tokens);
        }
        Ok(tokens)
    }
}

fn is_edge_punct(c: char) -> bool {
    c.is_ascii_punctuation() || "，。！？；：、“”‘’（）《》".contains(c)
}

fn split_edge_punctuation(word: &str, out: &mut Vec<String>) {
    let core = word.trim_matches(is_edge_punct);
    if core.is_empty() {
        out.extend(word.chars().map(String::from));
        return;
    }

    let start = word.len() - word.trim_start_matches(is_edge_punct).len();
    let end = start + core.len();

    out.extend(word[..start].chars().map(String::from));
    out.push(core.to_string());
    out.extend(word[end..].chars().map(String::from));
}
