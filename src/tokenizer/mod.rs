/// Tokenizer backends and language-based routing.
///
/// Every backend implements [`TokenizerModel`]; [`router::TokenRouter`]
/// picks one per [`crate::language::LanguageTag`].
pub mod download;
pub mod hf;
pub mod jieba;
pub mod mock;
pub mod router;

use thiserror::Error;

/// Errors a tokenizer backend can produce.
#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("model load failed: {0}")]
    ModelLoad(String),

    #[error("mock failure: {0}")]
    Mock(String),
}

/// A pretrained tokenizer turning text into an ordered list of tokens.
///
/// Implementations must be `Send + Sync`; the pipeline shares them behind
/// `Arc` and calls them concurrently without locking.
pub trait TokenizerModel: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Split `text` into tokens, in order of occurrence.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError>;
}
