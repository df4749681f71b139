/// CJK word segmentation with `jieba-rs`.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use jieba_rs::Jieba;
use tracing::info;

use super::{TokenizerError, TokenizerModel};

/// Chinese tokenizer backed by jieba's bundled dictionary.
pub struct JiebaTokenizer {
    inner: Jieba,
    hmm: bool,
}

impl JiebaTokenizer {
    /// Load the default dictionary, plus an optional user dictionary.
    ///
    /// User dictionary lines follow jieba's `word [freq] [tag]` format.
    pub fn new(user_dict: Option<&Path>, hmm: bool) -> Result<Self, TokenizerError> {
        info!("Loading CJK tokenizer...");
        let mut inner = Jieba::new();

        if let Some(path) = user_dict {
            let file = File::open(path).map_err(|e| {
                TokenizerError::ModelLoad(format!("user dict {}: {e}", path.display()))
            })?;
            inner
                .load_dict(&mut BufReader::new(file))
                .map_err(|e| TokenizerError::ModelLoad(format!("user dict parse error: {e}")))?;
            info!("Loaded user dictionary {}", path.display());
        }

        info!("CJK tokenizer loaded");
        Ok(Self { inner, hmm })
    }
}

impl TokenizerModel for JiebaTokenizer {
    fn name(&self) -> &str {
        "jieba"
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        Ok(self
            .inner
            .cut(text, self.hmm)
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_cut_keeps_order_and_punctuation() {
        let tok = JiebaTokenizer::new(None, true).unwrap();
        let tokens = tok.tokenize("我爱北京天安门，我爱北京天安门").unwrap();

        assert!(tokens.contains(&"北京".to_string()));
        assert!(tokens.contains(&"，".to_string()));
        assert_eq!(tokens.concat(), "我爱北京天安门，我爱北京天安门");
    }

    #[test]
    fn test_empty_input() {
        let tok = JiebaTokenizer::new(None, false).unwrap();
        assert!(tok.tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_user_dict() {
        let dir = tempdir().unwrap();
        let dict = dir.path().join("user.dict");
        fs::write(&dict, "向量检索 100000 n\n").unwrap();

        let tok = JiebaTokenizer::new(Some(&dict), false).unwrap();
        let tokens = tok.tokenize("向量检索系统").unwrap();
        assert_eq!(tokens[0], "向量检索");
    }

    #[test]
    fn test_missing_user_dict() {
        let result = JiebaTokenizer::new(Some(Path::new("/nonexistent/user.dict")), true);
        assert!(matches!(result, Err(TokenizerError::ModelLoad(_))));
    }
}
