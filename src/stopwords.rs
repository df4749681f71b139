//! Stopword set
//!
//! Built once at startup from the `stop-words` crate lists for the configured
//! languages, a built-in Chinese list, and an optional user file. Shared
//! read-only behind `Arc` afterwards.

use std::collections::HashSet;
use std::path::Path;

use stop_words::{LANGUAGE, get};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum StopwordError {
    #[error("failed to read stopword file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// An immutable set of stopwords, stored lowercase.
///
/// Lookups are case-insensitive: the filter runs before lower-casing, so
/// `THE`, `The` and `the` must all match.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Build the set for the given language codes, plus an optional file with
    /// one word per line (`#` starts a comment).
    pub fn load(languages: &[String], extra_file: Option<&Path>) -> Result<Self, StopwordError> {
        let mut words = HashSet::new();

        for language in languages {
            let list = builtin_list(language);
            if list.is_empty() {
                warn!("No stopword list for language {language}, skipping");
            }
            words.extend(list.iter().map(|w| w.to_lowercase()));
        }

        if let Some(path) = extra_file {
            let data = std::fs::read_to_string(path).map_err(|source| StopwordError::Read {
                path: path.display().to_string(),
                source,
            })?;
            words.extend(parse_word_list(&data));
        }

        info!("Loaded {} stopwords", words.len());
        Ok(Self { words })
    }

    /// Build a set from a fixed list of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(|w| w.into().to_lowercase()).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token) || self.words.contains(&token.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn builtin_list(language: &str) -> Vec<String> {
    let lang = match language.to_lowercase().as_str() {
        "zh" | "chinese" => return chinese_stopwords(),
        "en" | "english" => LANGUAGE::English,
        "de" | "german" => LANGUAGE::German,
        "fr" | "french" => LANGUAGE::French,
        "es" | "spanish" => LANGUAGE::Spanish,
        "it" | "italian" => LANGUAGE::Italian,
        "pt" | "portuguese" => LANGUAGE::Portuguese,
        "nl" | "dutch" => LANGUAGE::Dutch,
        "ru" | "russian" => LANGUAGE::Russian,
        "ar" | "arabic" => LANGUAGE::Arabic,
        _ => return Vec::new(),
    };

    get(lang).iter().map(|s| s.to_string()).collect()
}

/// Common Chinese function words, in both scripts where they differ.
fn chinese_stopwords() -> Vec<String> {
    [
        "的", "地", "得", "是", "在", "有", "和", "与", "或", "不", "了", "也", "就", "都",
        "而", "及", "这", "那", "个", "为", "以", "等", "但", "被", "给", "让", "把", "从",
        "到", "对", "将", "于", "能", "会", "可", "要", "很", "还", "更", "最", "只", "已",
        "又", "再", "着", "过", "吗", "呢", "吧", "啊", "之", "其", "此", "我们", "你们",
        "他们", "她们", "它们", "这个", "那个", "这些", "那些", "什么", "因为", "所以",
        "如果", "但是", "而且", "或者", "以及", "這", "個", "為", "與", "從", "對", "將",
        "會", "還", "這個", "那個", "這些", "那些", "們", "我們", "你們", "他們", "因為",
        "所以", "如果", "但是", "而且", "或者",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn parse_word_list(data: &str) -> impl Iterator<Item = String> + '_ {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
}
