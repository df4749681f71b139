/// Token noise filter.
///
/// Drops stopwords, blank tokens and lone punctuation characters while
/// keeping the remaining tokens in their original order and case.
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::stopwords::StopwordSet;

/// Unicode general category P*.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{P}$").expect("valid punctuation regex"));

/// Whether `token` is a single punctuation character.
#[must_use]
pub fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(_), None)) && PUNCTUATION.is_match(token)
}

#[derive(Debug, Clone)]
pub struct TokenFilter {
    stopwords: Arc<StopwordSet>,
}

impl TokenFilter {
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        Self { stopwords }
    }

    #[must_use]
    pub fn keep(&self, token: &str) -> bool {
        !self.stopwords.contains(token) && !token.trim().is_empty() && !is_punctuation(token)
    }

    /// Filter `tokens`, preserving order.
    #[must_use]
    pub fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().filter(|t| self.keep(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_with(words: &[&str]) -> TokenFilter {
        TokenFilter::new(Arc::new(StopwordSet::from_words(words.iter().copied())))
    }

    fn owned(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_punctuation() {
        assert!(is_punctuation(","));
        assert!(is_punctuation("，"));
        assert!(is_punctuation("。"));
        assert!(is_punctuation("!"));
        assert!(is_punctuation("「"));
        assert!(!is_punctuation("a"));
        assert!(!is_punctuation("..."));
        assert!(!is_punctuation(""));
        // Symbols are category S, not P.
        assert!(!is_punctuation("+"));
        assert!(!is_punctuation("$"));
    }

    #[test]
    fn test_filter_drops_noise_in_order() {
        let f = filter_with(&["的"]);
        let tokens = owned(&["我", "的", "北京", "，", " ", "", "天安门", "\t", "!"]);
        assert_eq!(f.filter(tokens), owned(&["我", "北京", "天安门"]));
    }

    #[test]
    fn test_filter_stopwords_any_case_keeps_token_case() {
        let f = filter_with(&["the", "and"]);
        let tokens = owned(&["The", "the", "THE", "Rust", "AND", "tHe", "CARGO"]);
        assert_eq!(f.filter(tokens), owned(&["Rust", "CARGO"]));
    }

    #[test]
    fn test_filter_keeps_multi_char_punctuation() {
        let f = filter_with(&[]);
        assert_eq!(f.filter(owned(&["...", "--"])), owned(&["...", "--"]));
    }

    #[test]
    fn test_filter_all_dropped() {
        let f = filter_with(&["a"]);
        assert!(f.filter(owned(&["a", ",", " "])).is_empty());
    }
}
