//! Fetching and installing the word database.
//!
//! The snapshot is a gzip-compressed SQLite file. It is downloaded into
//! memory, decompressed to `<dest>.tmp`, and renamed over `dest` so a partial
//! download never leaves a broken `word.db` behind.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result};
use crate::paths;

/// What `download_word_db` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// A new database was written; carries the decompressed size in bytes.
    Installed(u64),
    /// `dest` already existed; nothing was fetched.
    AlreadyPresent,
}

/// Download the compressed word database from `url` and install it at `dest`.
pub async fn download_word_db(url: &str, dest: &Path, timeout: Duration) -> Result<DownloadOutcome> {
    if dest.exists() {
        tracing::info!(path = %dest.display(), "word database already present");
        return Ok(DownloadOutcome::AlreadyPresent);
    }
    paths::ensure_dir(dest)?;

    let compressed = fetch(url, timeout).await?;
    let dest = dest.to_path_buf();
    let written = tokio::task::spawn_blocking(move || install_gzip(&compressed[..], &dest))
        .await
        .map_err(|e| Error::Download(format!("install task failed: {e}")))??;

    Ok(DownloadOutcome::Installed(written))
}

/// GET `url` into memory with a progress bar.
async fn fetch(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Download(format!("failed to build HTTP client: {e}")))?;

    tracing::info!(url, "downloading word database");
    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Download(format!("HTTP request failed for {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(Error::Download(format!(
            "download failed with HTTP {}",
            response.status()
        )));
    }

    let pb = progress_bar(response.content_length());
    let mut body = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| Error::Download(format!("error reading response: {e}")))?
    {
        pb.inc(chunk.len() as u64);
        body.extend_from_slice(&chunk);
    }
    pb.finish_and_clear();

    tracing::debug!(bytes = body.len(), "download complete");
    Ok(body)
}

fn progress_bar(total: Option<u64>) -> ProgressBar {
    match total {
        Some(size) => {
            let pb = ProgressBar::new(size);
            if let Ok(style) =
                ProgressStyle::default_bar().template("  {bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})")
            {
                pb.set_style(style.progress_chars("##-"));
            }
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(100));
            pb.set_message("downloading...");
            pb
        }
    }
}

/// Decompress `gz` into `<dest>.tmp` and rename it onto `dest`. Returns the
/// number of decompressed bytes.
pub fn install_gzip(gz: impl Read, dest: &Path) -> Result<u64> {
    let tmp_path = tmp_path_for(dest);
    let written = write_decompressed(gz, &tmp_path);
    let written = match written {
        Ok(n) => n,
        Err(e) => {
            // best effort; the original error is what matters
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e);
        }
    };

    std::fs::rename(&tmp_path, dest)?;
    tracing::info!(path = %dest.display(), bytes = written, "word database installed");
    Ok(written)
}

fn write_decompressed(gz: impl Read, tmp_path: &Path) -> Result<u64> {
    let mut decoder = GzDecoder::new(gz);
    let mut file = std::fs::File::create(tmp_path)?;
    let written = std::io::copy(&mut decoder, &mut file)?;
    file.sync_all()?;
    Ok(written)
}

fn tmp_path_for(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    dest.with_file_name(name)
}
