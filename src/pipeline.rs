/// Keyword extraction pipeline.
///
/// Detect language → route-tokenize → filter → rank. The pipeline is built
/// once in the composition root and shared behind `Arc`; every component
/// it holds is read-only after construction.
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::filter::TokenFilter;
use crate::language::trigram::WhatlangModel;
use crate::language::{LanguageIdentifier, LanguageModel, LanguageTag};
use crate::rank::rank;
use crate::script::ScriptNormalizer;
use crate::stopwords::{StopwordError, StopwordSet};
use crate::tokenizer::hf::HfTokenizer;
use crate::tokenizer::jieba::JiebaTokenizer;
use crate::tokenizer::router::{TokenRouter, TokenizationError};
use crate::tokenizer::{TokenizerError, TokenizerModel, download};

/// Number of keywords returned when the caller does not ask for a count.
pub const DEFAULT_TOP_N: usize = 10;

/// Construction-time failures. Fatal: the pipeline is unusable.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("tokenizer load failed: {0}")]
    ModelLoad(#[from] TokenizerError),

    #[error("stopword load failed: {0}")]
    Stopwords(#[from] StopwordError),

    #[error("model download failed: {0}")]
    Download(String),
}

pub struct KeywordPipeline {
    identifier: LanguageIdentifier,
    router: TokenRouter,
    filter: TokenFilter,
}

impl KeywordPipeline {
    /// Assemble a pipeline from already loaded collaborators.
    pub fn new(
        language: Arc<dyn LanguageModel>,
        cjk: Arc<dyn TokenizerModel>,
        multilingual: Arc<dyn TokenizerModel>,
        script: Arc<ScriptNormalizer>,
        stopwords: Arc<StopwordSet>,
    ) -> Self {
        Self {
            identifier: LanguageIdentifier::new(language),
            router: TokenRouter::new(cjk, multilingual, script),
            filter: TokenFilter::new(stopwords),
        }
    }

    /// Load every model named in `config`.
    ///
    /// Blocks on disk and, when the tokenizer is missing and
    /// `auto_download` is set, on the network.
    pub fn load(config: &Config) -> Result<Self, PipelineError> {
        let script = Arc::new(ScriptNormalizer::new());
        let stopwords = Arc::new(load_stopwords(config)?);

        let cjk = JiebaTokenizer::new(config.cjk.user_dict.as_deref().map(Path::new), config.cjk.hmm)?;

        let model_dir = download::model_dir(&config.resolve_model_home(), &config.multilingual.repo);
        if config.multilingual.auto_download && !download::all_files_present(&model_dir) {
            download::download_model_files(&model_dir, &config.multilingual.repo)
                .map_err(|e| PipelineError::Download(format!("{e:#}")))?;
        }
        let multilingual = HfTokenizer::from_model_dir(&model_dir)?;

        info!("Keyword pipeline ready");
        Ok(Self::new(
            Arc::new(WhatlangModel::new(script.clone())),
            Arc::new(cjk),
            Arc::new(multilingual),
            script,
            stopwords,
        ))
    }

    /// Detected language of `text`.
    pub fn detect(&self, text: &str) -> LanguageTag {
        self.identifier.detect(text)
    }

    /// The `top_n` most frequent meaningful tokens of `text`, lower-cased.
    pub fn top_n_tokens(&self, text: &str, top_n: usize) -> Result<Vec<String>, TokenizationError> {
        let preview: String = text.chars().take(20).collect();
        debug!("Extracting keywords: {preview}...");

        let lang = self.identifier.detect(text);
        debug!("Detected language: {lang}");

        let tokens = self.router.tokenize(text, &lang)?;
        if tokens.is_empty() {
            debug!("Tokenizer returned no tokens");
            return Ok(Vec::new());
        }

        let tokens = self.filter.filter(tokens);
        if tokens.is_empty() {
            debug!("No tokens left after filtering");
            return Ok(Vec::new());
        }

        let top = rank(&tokens, top_n);
        debug!("Top tokens: {top:?}");
        Ok(top)
    }

    /// [`Self::top_n_tokens`] with [`DEFAULT_TOP_N`].
    pub fn top_n_tokens_default(&self, text: &str) -> Result<Vec<String>, TokenizationError> {
        self.top_n_tokens(text, DEFAULT_TOP_N)
    }
}

/// A language identifier on its own, without loading any tokenizer.
pub fn load_identifier() -> LanguageIdentifier {
    let script = Arc::new(ScriptNormalizer::new());
    LanguageIdentifier::new(Arc::new(WhatlangModel::new(script)))
}

/// Stopwords for `config`, relative paths resolved against the working
/// directory.
pub fn load_stopwords(config: &Config) -> Result<StopwordSet, StopwordError> {
    StopwordSet::load(
        &config.stopwords.languages,
        config.stopwords.extra_file.as_deref().map(Path::new),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::mock::MockLanguageModel;
    use crate::tokenizer::mock::MockTokenizer;

    fn pipeline(lang: &str, multi: MockTokenizer) -> KeywordPipeline {
        KeywordPipeline::new(
            Arc::new(MockLanguageModel::returning(lang)),
            Arc::new(MockTokenizer::new("cjk")),
            Arc::new(multi),
            Arc::new(ScriptNormalizer::new()),
            Arc::new(StopwordSet::from_words(["the", "of", "的"])),
        )
    }

    #[test]
    fn test_empty_input() {
        let p = pipeline("eng", MockTokenizer::new("multi"));
        assert!(p.top_n_tokens("", 5).unwrap().is_empty());
        assert!(p.top_n_tokens("   ", 1).unwrap().is_empty());
    }

    #[test]
    fn test_all_filtered() {
        let p = pipeline("eng", MockTokenizer::new("multi"));
        assert!(p.top_n_tokens("the of , !", 5).unwrap().is_empty());
    }

    #[test]
    fn test_ranks_and_lowercases() {
        let p = pipeline("eng", MockTokenizer::new("multi"));
        let top = p
            .top_n_tokens("The Rust book, the rust compiler. Rust wins!", 2)
            .unwrap();
        assert_eq!(top, vec!["rust", "book"]);
    }

    #[test]
    fn test_upper_case_stopwords_filtered() {
        let p = pipeline("eng", MockTokenizer::new("multi"));
        let top = p.top_n_tokens("THE RUST OF THE CRATE tHe", 3).unwrap();
        assert_eq!(top, vec!["rust", "crate"]);
    }

    #[test]
    fn test_fallback_never_raises() {
        let p = pipeline("eng", MockTokenizer::failing("multi"));
        let top = p.top_n_tokens("alpha beta alpha", 10).unwrap();
        assert_eq!(top, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_default_top_n() {
        let p = pipeline("eng", MockTokenizer::new("multi"));
        let text: Vec<String> = (0..15).map(|i| format!("w{i}")).collect();
        let top = p.top_n_tokens_default(&text.join(" ")).unwrap();
        assert_eq!(top.len(), DEFAULT_TOP_N);
    }

    #[test]
    fn test_zero_top_n() {
        let p = pipeline("eng", MockTokenizer::new("multi"));
        assert!(p.top_n_tokens("alpha beta", 0).unwrap().is_empty());
    }

    #[test]
    fn test_identifier_needs_no_tokenizer() {
        let identifier = load_identifier();
        assert_eq!(
            identifier.detect("我爱北京天安门，天安门上太阳升"),
            LanguageTag::SimplifiedChinese
        );
        assert_eq!(
            identifier.detect("The quick brown fox jumps over the lazy dog near the river"),
            LanguageTag::Other("eng".to_string())
        );
    }

    #[test]
    fn test_detect_delegates() {
        let p = pipeline("zh-tw", MockTokenizer::new("multi"));
        assert_eq!(p.detect("我愛北京天安門"), LanguageTag::TraditionalChinese);
    }
}
