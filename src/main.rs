use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keyterm::config::Config;
use keyterm::language::trigram::WhatlangModel;
use keyterm::pipeline::{load_identifier, load_stopwords};
use keyterm::script::ScriptNormalizer;
use keyterm::tokenizer::download;
use keyterm::tokenizer::mock::MockTokenizer;
use keyterm::{KeywordPipeline, KeywordPool};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keyterm", version, about = "Keyword extraction for RAG ingestion")]
struct Cli {
    /// Path to the JSON config file (default: keyterm.json)
    #[arg(long, global = true, default_value = "")]
    config: String,

    /// Use whitespace mock tokenizers instead of loading models
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the top keywords of a text as a JSON array
    Extract {
        /// Text to analyse; read from stdin when neither TEXT nor --file is given
        text: Option<String>,
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        #[arg(long)]
        top_n: Option<usize>,
    },
    /// Print the detected language tag
    Detect { text: String },
    /// Extract keywords for every `{"id", "text"}` line of a JSONL file
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        top_n: Option<usize>,
        /// Give up on a single document after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Download the multilingual tokenizer into the model cache
    Download,
}

#[derive(Deserialize)]
struct BatchDoc {
    id: serde_json::Value,
    text: String,
}

#[derive(Serialize)]
struct BatchResult {
    id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // 1. Load config
    let config = Config::load(&cli.config)?;
    config.validate()?;

    // Detection needs no tokenizer, so skip model loading entirely.
    if let Command::Detect { text } = &cli.command {
        println!("{}", load_identifier().detect(text));
        return Ok(());
    }

    if let Command::Download = cli.command {
        let model_dir = download::model_dir(&config.resolve_model_home(), &config.multilingual.repo);
        let repo = config.multilingual.repo.clone();
        tokio::task::spawn_blocking(move || download::download_model_files(&model_dir, &repo))
            .await??;
        return Ok(());
    }

    // 2. Load models (fatal on failure)
    let pipeline = {
        let config = config.clone();
        let mock = cli.mock;
        tokio::task::spawn_blocking(move || build_pipeline(&config, mock))
            .await?
            .context("failed to initialize keyword pipeline")?
    };
    let pool = KeywordPool::new(Arc::new(pipeline), config.workers);

    // 3. Run
    match cli.command {
        Command::Extract { text, file, top_n } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read stdin")?;
                    buf
                }
            };
            let keywords = pool
                .top_n_tokens(text, top_n.unwrap_or(config.default_top_n))
                .await?;
            println!("{}", serde_json::to_string(&keywords)?);
        }
        Command::Batch {
            input,
            top_n,
            timeout_ms,
        } => {
            let top_n = top_n.unwrap_or(config.default_top_n);
            run_batch(&pool, &input, top_n, timeout_ms.map(Duration::from_millis)).await?;
        }
        Command::Detect { .. } | Command::Download => {}
    }

    Ok(())
}

fn build_pipeline(config: &Config, mock: bool) -> Result<KeywordPipeline> {
    if !mock {
        return Ok(KeywordPipeline::load(config)?);
    }

    info!("Using mock tokenizers");
    let script = Arc::new(ScriptNormalizer::new());
    let stopwords = Arc::new(load_stopwords(config)?);
    Ok(KeywordPipeline::new(
        Arc::new(WhatlangModel::new(script.clone())),
        Arc::new(MockTokenizer::new("cjk-mock")),
        Arc::new(MockTokenizer::new("multilingual-mock")),
        script,
        stopwords,
    ))
}

async fn run_batch(
    pool: &KeywordPool,
    input: &Path,
    top_n: usize,
    timeout: Option<Duration>,
) -> Result<()> {
    let data = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let mut handles = Vec::new();
    for (line_no, line) in data.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let doc: BatchDoc = match serde_json::from_str(line) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Skipping line {}: {e}", line_no + 1);
                continue;
            }
        };

        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            let result = match timeout {
                Some(t) => pool.top_n_tokens_with_timeout(doc.text, top_n, t).await,
                None => pool.top_n_tokens(doc.text, top_n).await,
            };
            match result {
                Ok(keywords) => BatchResult {
                    id: doc.id,
                    keywords: Some(keywords),
                    error: None,
                },
                Err(e) => BatchResult {
                    id: doc.id,
                    keywords: None,
                    error: Some(e.to_string()),
                },
            }
        }));
    }

    let total = handles.len();
    let mut failed = 0;
    for handle in handles {
        let result = handle.await?;
        if result.error.is_some() {
            failed += 1;
        }
        println!("{}", serde_json::to_string(&result)?);
    }

    info!("Processed {total} documents ({failed} failed)");
    Ok(())
}
