/// Mock language model for testing purposes.
///
/// Returns a fixed code (or a fixed failure) and counts calls, so tests can
/// assert when the identifier bypasses the model.
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{DetectionError, LanguageModel};

/// A language model with a canned answer.
pub struct MockLanguageModel {
    code: Option<String>,
    calls: AtomicUsize,
}

impl MockLanguageModel {
    /// A model that always answers `code`.
    #[must_use]
    pub fn returning(code: &str) -> Self {
        Self {
            code: Some(code.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A model that always fails with [`DetectionError::Undetermined`].
    #[must_use]
    pub fn failing() -> Self {
        Self {
            code: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `detect` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LanguageModel for MockLanguageModel {
    fn detect(&self, _text: &str) -> Result<String, DetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.code.clone().ok_or(DetectionError::Undetermined)
    }
}
