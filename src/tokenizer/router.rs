/// Language-based routing between the CJK and multilingual tokenizers.
///
/// Traditional Chinese is tokenized on its simplified form and converted
/// back token by token. Anything that is not Chinese goes to the
/// multilingual model, with one explicit retry on the CJK model when that
/// fails.
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use super::{TokenizerError, TokenizerModel};
use crate::language::LanguageTag;
use crate::script::ScriptNormalizer;

/// Tokenization failure surfaced to callers of the pipeline.
#[derive(Error, Debug)]
pub enum TokenizationError {
    #[error("{backend} tokenizer failed: {source}")]
    Backend {
        backend: String,
        #[source]
        source: TokenizerError,
    },

    #[error("multilingual tokenizer failed ({primary}) and CJK fallback failed ({fallback})")]
    FallbackFailed {
        primary: TokenizerError,
        fallback: TokenizerError,
    },
}

/// Which backend path a language takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// t2s, CJK model, then s2t per token.
    Traditional,
    /// CJK model on the text as is.
    Simplified,
    /// Multilingual model, CJK model on failure.
    Multilingual,
}

impl Route {
    #[must_use]
    pub fn for_tag(tag: &LanguageTag) -> Self {
        match tag {
            LanguageTag::TraditionalChinese => Self::Traditional,
            LanguageTag::SimplifiedChinese => Self::Simplified,
            LanguageTag::Other(_) | LanguageTag::Unknown => Self::Multilingual,
        }
    }
}

/// Selects a tokenizer backend per language and handles fallback.
#[derive(Clone)]
pub struct TokenRouter {
    cjk: Arc<dyn TokenizerModel>,
    multilingual: Arc<dyn TokenizerModel>,
    script: Arc<ScriptNormalizer>,
}

impl TokenRouter {
    pub fn new(
        cjk: Arc<dyn TokenizerModel>,
        multilingual: Arc<dyn TokenizerModel>,
        script: Arc<ScriptNormalizer>,
    ) -> Self {
        Self {
            cjk,
            multilingual,
            script,
        }
    }

    /// Tokenize `text` using the backend chosen for `lang`.
    pub fn tokenize(&self, text: &str, lang: &LanguageTag) -> Result<Vec<String>, TokenizationError> {
        let route = Route::for_tag(lang);
        debug!("Routing tokenization: lang={lang} route={route:?}");

        match route {
            Route::Traditional => {
                let simplified = self.script.to_simplified(text);
                let tokens = self.run_cjk(&simplified)?;
                Ok(tokens
                    .iter()
                    .map(|token| self.script.to_traditional(token))
                    .collect())
            }
            Route::Simplified => self.run_cjk(text),
            Route::Multilingual => match self.multilingual.tokenize(text) {
                Ok(tokens) => Ok(tokens),
                Err(primary) => {
                    error!(
                        "{} tokenizer failed: {primary}, retrying with {}",
                        self.multilingual.name(),
                        self.cjk.name()
                    );
                    self.cjk
                        .tokenize(text)
                        .map_err(|fallback| TokenizationError::FallbackFailed { primary, fallback })
                }
            },
        }
    }

    fn run_cjk(&self, text: &str) -> Result<Vec<String>, TokenizationError> {
        self.cjk
            .tokenize(text)
            .map_err(|source| TokenizationError::Backend {
                backend: self.cjk.name().to_string(),
                source,
            })
    }
}
