/// Traditional/simplified Chinese script conversion.
///
/// Wraps OpenCC's phrase and character tables. Conversion never fails:
/// characters missing from the tables pass through unchanged, so mixed or
/// already-normalized input is safe to convert.
use opencc_jieba_rs::OpenCC;
use tracing::info;

/// Which way to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TraditionalToSimplified,
    SimplifiedToTraditional,
}

/// Bidirectional script converter backed by OpenCC tables.
///
/// Tables are loaded once in [`ScriptNormalizer::new`] and are read-only
/// afterwards, so one instance can be shared across threads.
pub struct ScriptNormalizer {
    inner: OpenCC,
}

impl ScriptNormalizer {
    /// Load the conversion tables.
    pub fn new() -> Self {
        info!("Loading script conversion tables...");
        let inner = OpenCC::new();
        info!("Script conversion tables loaded");
        Self { inner }
    }

    /// Convert `text` in the given direction. Punctuation is left as is.
    #[must_use]
    pub fn convert(&self, text: &str, direction: Direction) -> String {
        if text.is_empty() {
            return String::new();
        }
        match direction {
            Direction::TraditionalToSimplified => self.inner.t2s(text, false),
            Direction::SimplifiedToTraditional => self.inner.s2t(text, false),
        }
    }

    /// Shorthand for [`Direction::TraditionalToSimplified`].
    #[must_use]
    pub fn to_simplified(&self, text: &str) -> String {
        self.convert(text, Direction::TraditionalToSimplified)
    }

    /// Shorthand for [`Direction::SimplifiedToTraditional`].
    #[must_use]
    pub fn to_traditional(&self, text: &str) -> String {
        self.convert(text, Direction::SimplifiedToTraditional)
    }

    /// Whether `text` contains characters the traditional→simplified table
    /// would rewrite.
    #[must_use]
    pub fn has_traditional(&self, text: &str) -> bool {
        self.to_simplified(text) != text
    }
}

impl Default for ScriptNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
