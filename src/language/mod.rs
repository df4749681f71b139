/// Language identification.
///
/// [`LanguageIdentifier`] wraps a probabilistic [`LanguageModel`] and adds a
/// short-text override for CJK input. Detection is best effort: a model
/// failure degrades to [`LanguageTag::Unknown`] instead of an error, since the
/// tokenizer router has its own fallback path.
pub mod mock;
pub mod trigram;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

/// Inputs shorter than this (after trimming) are too short for the model.
pub const SHORT_TEXT_CHARS: usize = 3;

/// Errors a language model may report.
#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("no language features found in input")]
    Undetermined,

    #[error("detection failed: {0}")]
    Failed(String),
}

/// Detected language, as consumed by the tokenizer router.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LanguageTag {
    SimplifiedChinese,
    TraditionalChinese,
    Other(String),
    Unknown,
}

impl LanguageTag {
    /// Parse a model language code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.to_ascii_lowercase().as_str() {
            "zh-cn" => Self::SimplifiedChinese,
            "zh-tw" | "zh-hant" => Self::TraditionalChinese,
            "unknown" | "" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::SimplifiedChinese => "zh-cn",
            Self::TraditionalChinese => "zh-tw",
            Self::Other(code) => code,
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A probabilistic language identification backend.
///
/// Implementations must be deterministic for identical input and safe for
/// concurrent read-only use.
pub trait LanguageModel: Send + Sync {
    /// Return a language code such as `"zh-cn"`, `"zh-tw"` or `"eng"`.
    fn detect(&self, text: &str) -> Result<String, DetectionError>;
}

/// Whether `c` lies in the CJK Unified Ideographs block.
#[must_use]
pub fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Classifies text into a [`LanguageTag`].
#[derive(Clone)]
pub struct LanguageIdentifier {
    model: Arc<dyn LanguageModel>,
}

impl LanguageIdentifier {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Detect the language of `text`. Never fails.
    pub fn detect(&self, text: &str) -> LanguageTag {
        if text.trim().chars().count() < SHORT_TEXT_CHARS && text.chars().any(is_cjk_ideograph) {
            return LanguageTag::SimplifiedChinese;
        }

        match self.model.detect(text) {
            Ok(code) => LanguageTag::from_code(&code),
            Err(e) => {
                debug!("Language detection failed, using unknown: {e}");
                LanguageTag::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockLanguageModel;
    use super::*;

    #[test]
    fn test_tag_from_code() {
        assert_eq!(LanguageTag::from_code("zh-cn"), LanguageTag::SimplifiedChinese);
        assert_eq!(LanguageTag::from_code("zh-TW"), LanguageTag::TraditionalChinese);
        assert_eq!(LanguageTag::from_code("zh-hant"), LanguageTag::TraditionalChinese);
        assert_eq!(LanguageTag::from_code("unknown"), LanguageTag::Unknown);
        assert_eq!(LanguageTag::from_code("eng"), LanguageTag::Other("eng".into()));
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(LanguageTag::SimplifiedChinese.to_string(), "zh-cn");
        assert_eq!(LanguageTag::Other("fra".into()).to_string(), "fra");
    }

    #[test]
    fn test_short_cjk_skips_model() {
        let model = Arc::new(MockLanguageModel::returning("eng"));
        let id = LanguageIdentifier::new(model.clone());

        assert_eq!(id.detect("中"), LanguageTag::SimplifiedChinese);
        assert_eq!(id.detect("  北京 "), LanguageTag::SimplifiedChinese);
        assert_eq!(model.calls(), 0);
    }

    #[test]
    fn test_short_non_cjk_uses_model() {
        let model = Arc::new(MockLanguageModel::returning("eng"));
        let id = LanguageIdentifier::new(model.clone());

        assert_eq!(id.detect("ok"), LanguageTag::Other("eng".into()));
        assert_eq!(model.calls(), 1);
    }

    #[test]
    fn test_long_cjk_uses_model() {
        let model = Arc::new(MockLanguageModel::returning("zh-tw"));
        let id = LanguageIdentifier::new(model.clone());

        assert_eq!(id.detect("我愛北京天安門"), LanguageTag::TraditionalChinese);
        assert_eq!(model.calls(), 1);
    }

    #[test]
    fn test_model_failure_is_unknown() {
        let model = Arc::new(MockLanguageModel::failing());
        let id = LanguageIdentifier::new(model.clone());

        assert_eq!(id.detect("12345 !!!"), LanguageTag::Unknown);
        assert_eq!(id.detect(""), LanguageTag::Unknown);
        assert_eq!(model.calls(), 2);
    }

    #[test]
    fn test_is_cjk_ideograph() {
        assert!(is_cjk_ideograph('中'));
        assert!(!is_cjk_ideograph('a'));
        assert!(!is_cjk_ideograph('，'));
    }
}
