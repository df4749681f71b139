/// `whatlang`-backed language model.
///
/// whatlang is a deterministic trigram classifier, so repeated calls on the
/// same input always agree. It reports Mandarin as a single language; the
/// simplified/traditional split is made with the script conversion tables.
use std::sync::Arc;

use whatlang::Lang;

use super::{DetectionError, LanguageModel};
use crate::script::ScriptNormalizer;

pub struct WhatlangModel {
    script: Arc<ScriptNormalizer>,
}

impl WhatlangModel {
    pub fn new(script: Arc<ScriptNormalizer>) -> Self {
        Self { script }
    }
}

impl LanguageModel for WhatlangModel {
    fn detect(&self, text: &str) -> Result<String, DetectionError> {
        let info = whatlang::detect(text).ok_or(DetectionError::Undetermined)?;

        let code = match info.lang() {
            Lang::Cmn if self.script.has_traditional(text) => "zh-tw",
            Lang::Cmn => "zh-cn",
            other => other.code(),
        };
        Ok(code.to_string())
    }
}
