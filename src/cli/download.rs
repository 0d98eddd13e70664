//! CLI `download` command.

use std::time::Duration;

use anyhow::{Context, Result};

use jrp::download::{self, DownloadOutcome};

use super::App;

/// Fetch the word database into the data directory unless it is already there.
pub async fn run(app: &App) -> Result<()> {
    let dest = app.paths.word_db_path();
    let url = &app.config.download.url;

    if !dest.exists() {
        println!("Downloading word database from {url}...");
    }
    let outcome = download::download_word_db(
        url,
        &dest,
        Duration::from_secs(app.config.download.timeout_secs),
    )
    .await
    .with_context(|| format!("failed to download word database to {}", dest.display()))?;

    match outcome {
        DownloadOutcome::AlreadyPresent => {
            println!("Word database already exists at {}", dest.display());
        }
        DownloadOutcome::Installed(bytes) => {
            println!("Word database saved to {} ({bytes} bytes)", dest.display());
        }
    }
    Ok(())
}
