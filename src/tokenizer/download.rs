/// Tokenizer file auto-download from HuggingFace.
///
/// Fetches the multilingual model's tokenizer files into the model cache
/// directory when they are not already there.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

/// Base URL for HuggingFace model files.
const HF_BASE: &str = "https://huggingface.co";

/// Files required by the multilingual tokenizer.
const MODEL_FILES: &[&str] = &["tokenizer.json"];

/// Local directory for a HuggingFace repo id under `model_home`.
///
/// `google-bert/bert-base-multilingual-cased` maps to
/// `<model_home>/bert-base-multilingual-cased`.
#[must_use]
pub fn model_dir(model_home: &Path, repo: &str) -> PathBuf {
    let name = repo.rsplit('/').next().unwrap_or(repo);
    model_home.join(name)
}

/// Check whether all required files exist in `model_dir`.
#[must_use]
pub fn all_files_present(model_dir: &Path) -> bool {
    MODEL_FILES.iter().all(|name| model_dir.join(name).exists())
}

/// Download tokenizer files for `repo` if any are missing.
///
/// Creates the model directory if it doesn't exist.
/// Skips individual files that are already present.
pub fn download_model_files(model_dir: &Path, repo: &str) -> Result<()> {
    info!("Checking tokenizer files in {}", model_dir.display());

    fs::create_dir_all(model_dir)
        .with_context(|| format!("failed to create model directory: {}", model_dir.display()))?;

    if all_files_present(model_dir) {
        info!("All tokenizer files found, skipping download");
        return Ok(());
    }

    info!("Downloading tokenizer files for {repo} from HuggingFace...");

    for &filename in MODEL_FILES {
        let dest = model_dir.join(filename);

        if dest.exists() {
            info!("File already exists: {filename}");
            continue;
        }

        let url = format!("{HF_BASE}/{repo}/resolve/main/{filename}");
        info!("Downloading {filename}...");
        download_file(&dest, &url).with_context(|| format!("failed to download {filename}"))?;
        info!("Downloaded {filename}");
    }

    info!("Tokenizer download complete");
    Ok(())
}

/// Download a single file with a progress bar.
fn download_file(dest: &Path, url: &str) -> Result<()> {
    let resp =
        reqwest::blocking::get(url).with_context(|| format!("HTTP request failed: {url}"))?;

    if !resp.status().is_success() {
        anyhow::bail!("bad status: {} for {url}", resp.status());
    }

    let total = resp.content_length().unwrap_or(0);

    let pb = if total > 0 {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {bar:40.cyan/blue} {percent}% ({bytes}/{total_bytes}) {msg}")
                .context("invalid progress template")?
                .progress_chars("█▓░"),
        );
        pb
    } else {
        ProgressBar::new_spinner()
    };

    let bytes = resp.bytes().context("failed to read response body")?;
    pb.set_position(bytes.len() as u64);
    pb.finish_and_clear();

    write_then_rename(dest, &bytes)
}

/// Write `bytes` to `<dest>.part`, then move it to `dest`.
///
/// Only complete downloads get the final name; the partial file is removed
/// when either step fails.
fn write_then_rename(dest: &Path, bytes: &[u8]) -> Result<()> {
    let partial = dest.with_extension("part");

    let result = fs::File::create(&partial)
        .with_context(|| format!("failed to create file: {}", partial.display()))
        .and_then(|mut file| file.write_all(bytes).context("failed to write file"))
        .and_then(|()| {
            fs::rename(&partial, dest)
                .with_context(|| format!("failed to move {} into place", partial.display()))
        });

    if result.is_err() && partial.exists() {
        if let Err(e) = fs::remove_file(&partial) {
            warn!("Failed to remove partial download {}: {e}", partial.display());
        }
    }

    result
}
