//! # keyterm — keyword extraction for RAG ingestion
//!
//! Turns raw document text into a ranked list of keyword tokens before the
//! document is embedded and indexed.
//!
//! ## Architecture
//!
//! - **[`script`]** — Traditional/simplified Chinese conversion (OpenCC tables)
//! - **[`language`]** — Language identification with a short-text CJK override
//! - **[`tokenizer`]** — CJK (jieba) and multilingual (HuggingFace) backends, routing, model download
//! - **[`stopwords`]** / **[`filter`]** — Stopword, blank and punctuation filtering
//! - **[`rank`]** — Frequency ranking with first-occurrence tie-break
//! - **[`pipeline`]** — The `top_n_tokens` operation
//! - **[`pool`]** — Bounded async front running extractions on blocking workers
//! - **[`config`]** — JSON configuration and model cache resolution

pub mod config;
pub mod filter;
pub mod language;
pub mod pipeline;
pub mod pool;
pub mod rank;
pub mod script;
pub mod stopwords;
pub mod tokenizer;

pub use pipeline::{DEFAULT_TOP_N, KeywordPipeline, PipelineError};
pub use pool::{KeywordPool, PoolError};
pub use tokenizer::router::TokenizationError;
