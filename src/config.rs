/// Configuration module for keyterm.
///
/// Handles loading, validating, and providing default configuration values.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Environment variable that overrides `model_home`.
pub const MODEL_HOME_ENV: &str = "KEYTERM_HOME";

/// Config file used when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "keyterm.json";

// ── Default value functions ──────────────────────────────────────────

fn default_top_n() -> usize {
    10
}

fn default_workers() -> usize {
    4
}

fn default_true() -> bool {
    true
}

fn default_repo() -> String {
    "google-bert/bert-base-multilingual-cased".to_string()
}

fn default_stopword_languages() -> Vec<String> {
    vec!["zh".to_string(), "en".to_string()]
}

// ── Config structs ───────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Model cache directory. `KEYTERM_HOME` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_home: Option<String>,

    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    /// Maximum number of extractions running at once.
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default)]
    pub cjk: CjkConfig,

    #[serde(default)]
    pub multilingual: MultilingualConfig,

    #[serde(default)]
    pub stopwords: StopwordConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CjkConfig {
    /// Extra jieba dictionary (`word [freq] [tag]` per line).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_dict: Option<String>,

    /// Use the HMM for words missing from the dictionary.
    #[serde(default = "default_true")]
    pub hmm: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MultilingualConfig {
    /// HuggingFace repo id of the tokenizer.
    #[serde(default = "default_repo")]
    pub repo: String,

    #[serde(default = "default_true")]
    pub auto_download: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StopwordConfig {
    #[serde(default = "default_stopword_languages")]
    pub languages: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_file: Option<String>,
}

// ── Default impls ────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        Self {
            model_home: None,
            default_top_n: default_top_n(),
            workers: default_workers(),
            cjk: CjkConfig::default(),
            multilingual: MultilingualConfig::default(),
            stopwords: StopwordConfig::default(),
        }
    }
}

impl Default for CjkConfig {
    fn default() -> Self {
        Self {
            user_dict: None,
            hmm: default_true(),
        }
    }
}

impl Default for MultilingualConfig {
    fn default() -> Self {
        Self {
            repo: default_repo(),
            auto_download: default_true(),
        }
    }
}

impl Default for StopwordConfig {
    fn default() -> Self {
        Self {
            languages: default_stopword_languages(),
            extra_file: None,
        }
    }
}

// ── Config implementation ────────────────────────────────────────────

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// If `config_path` is empty, defaults to `"keyterm.json"`.
    /// If the file does not exist, returns a default config and generates a
    /// template file for the default path.
    pub fn load(config_path: &str) -> Result<Self> {
        let path = if config_path.is_empty() {
            DEFAULT_CONFIG_PATH
        } else {
            config_path
        };

        if !Path::new(path).exists() {
            info!("{path} not found, using defaults");
            let cfg = Self::default();

            if path == DEFAULT_CONFIG_PATH {
                match cfg.save(path) {
                    Ok(()) => info!("Generated config template: {path}"),
                    Err(e) => warn!("Failed to generate config template: {e}"),
                }
            }

            return Ok(cfg);
        }

        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {path}"))?;

        let cfg: Config = match serde_json::from_str(&data) {
            Ok(c) => c,
            Err(e) => {
                warn!("Invalid JSON in {path}: {e}");
                warn!("Using default configuration");
                return Ok(Self::default());
            }
        };

        info!("Loaded configuration from {path}");
        Ok(cfg)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &str) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("failed to marshal config")?;
        std::fs::write(path, data).with_context(|| format!("failed to write config: {path}"))?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.default_top_n > 0, "default_top_n must be positive");
        anyhow::ensure!(self.workers > 0, "workers must be positive");
        anyhow::ensure!(
            !self.multilingual.repo.trim().is_empty(),
            "multilingual.repo must not be empty"
        );
        Ok(())
    }

    /// Resolve the model cache directory.
    ///
    /// Order: `KEYTERM_HOME`, `model_home`, the user cache directory, then
    /// `./models`.
    #[must_use]
    pub fn resolve_model_home(&self) -> PathBuf {
        resolve_model_home(std::env::var(MODEL_HOME_ENV).ok(), self.model_home.as_deref())
    }
}

fn resolve_model_home(env: Option<String>, configured: Option<&str>) -> PathBuf {
    if let Some(dir) = env.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }
    if let Some(dir) = configured {
        return PathBuf::from(dir);
    }
    dirs::cache_dir()
        .map(|d| d.join("keyterm").join("models"))
        .unwrap_or_else(|| PathBuf::from("models"))
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_top_n, 10);
        assert_eq!(config.workers, 4);
        assert!(config.cjk.hmm);
        assert!(config.multilingual.auto_download);
        assert_eq!(config.multilingual.repo, "google-bert/bert-base-multilingual-cased");
        assert_eq!(config.stopwords.languages, vec!["zh", "en"]);
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{"default_top_n": 20, "cjk": {"hmm": false}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_top_n, 20);
        assert!(!config.cjk.hmm);
        // Other fields should have defaults
        assert_eq!(config.workers, 4);
        assert!(config.multilingual.auto_download);
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(&path, r#"{"workers": 2, "model_home": "/srv/models"}"#).unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.workers, 2);
        assert_eq!(config.model_home.as_deref(), Some("/srv/models"));
    }

    #[test]
    fn test_load_missing_custom_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.default_top_n, 10);
        // Templates are only generated for the default path.
        assert!(!path.exists());
    }

    #[test]
    fn test_load_invalid_json_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.workers, 4);
    }

    #[test]
    fn test_validate_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_values() {
        let mut config = Config::default();
        config.workers = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.default_top_n = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.multilingual.repo = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_model_home_order() {
        assert_eq!(
            resolve_model_home(Some("/env/models".into()), Some("/cfg/models")),
            PathBuf::from("/env/models")
        );
        assert_eq!(
            resolve_model_home(Some("  ".into()), Some("/cfg/models")),
            PathBuf::from("/cfg/models")
        );
        let fallback = resolve_model_home(None, None);
        assert!(fallback.ends_with("models"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.default_top_n, config.default_top_n);
        assert_eq!(parsed.multilingual.repo, config.multilingual.repo);
        assert_eq!(parsed.stopwords.languages, config.stopwords.languages);
    }
}
