pub mod download;
pub mod favorite;
pub mod generate;
pub mod history;
pub mod interactive;

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Args;

use jrp::config::JrpConfig;
use jrp::count::resolve_count;
use jrp::history::{FavoriteStore, HistoryEntry, HistoryStore, RemoveStatus};
use jrp::paths::JrpPaths;
use jrp::render::{self, RenderMode};

/// Resolved configuration and locations shared by every command.
pub struct App {
    pub config: JrpConfig,
    pub paths: JrpPaths,
}

impl App {
    pub fn new(config: JrpConfig) -> Self {
        let paths = config.paths();
        Self { config, paths }
    }

    pub fn history(&self) -> HistoryStore {
        HistoryStore::new(self.paths.store_path())
    }

    pub fn favorites(&self) -> FavoriteStore {
        FavoriteStore::new(self.paths.store_path())
    }
}

/// `show [NUMBER...] [-n N] [--all] [--plain]`, shared by history and favorite.
#[derive(Args, Debug, Clone, Default)]
pub struct ShowArgs {
    /// How many of the most recent rows to show
    #[arg(value_name = "NUMBER")]
    pub args: Vec<String>,

    /// How many of the most recent rows to show
    #[arg(short, long)]
    pub number: Option<i64>,

    /// Show every row
    #[arg(short, long)]
    pub all: bool,

    /// Print phrases only
    #[arg(short = 'P', long)]
    pub plain: bool,
}

impl ShowArgs {
    pub fn count(&self, default: i64) -> i64 {
        resolve_count(&self.args, self.number.unwrap_or(0), default)
    }
}

/// `search KEYWORD... [-n N] [--and] [--all] [--plain]`, shared by history
/// and favorite.
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Substrings to look for (case-sensitive)
    #[arg(required = true, value_name = "KEYWORD")]
    pub keywords: Vec<String>,

    /// Size of the recent window to search in
    #[arg(short, long)]
    pub number: Option<i64>,

    /// Require every keyword instead of any
    #[arg(long)]
    pub and: bool,

    /// Search every row instead of the recent window
    #[arg(short, long)]
    pub all: bool,

    /// Print phrases only
    #[arg(short = 'P', long)]
    pub plain: bool,
}

impl SearchArgs {
    pub fn count(&self, default: i64) -> i64 {
        resolve_count::<&str>(&[], self.number.unwrap_or(0), default)
    }
}

/// Print `rows`, or `empty_notice` when there are none.
pub fn print_rows<T: AsRef<HistoryEntry>>(rows: &[T], plain: bool, empty_notice: &str) {
    if rows.is_empty() {
        println!("{empty_notice}");
        return;
    }
    print!("{}", render::render(rows, RenderMode::from_plain_flag(plain)));
}

/// Print the user-facing notice for a removal. `RemovedFailed` becomes an error.
pub fn report_removal(status: RemoveStatus) -> Result<()> {
    tracing::debug!(%status, "removal finished");
    match status {
        RemoveStatus::RemovedSuccessfully => println!("Removed successfully."),
        RemoveStatus::RemovedNotAll => println!("Removed some of the requested rows."),
        RemoveStatus::RemovedNone => println!("Nothing was removed."),
        RemoveStatus::RemovedFailed(e) => {
            return Err(anyhow::Error::new(e).context("failed to remove rows"));
        }
    }
    Ok(())
}

/// Ask a yes/no question on stdin. Only `y` / `yes` confirm.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N]: ");
    std::io::stdout().flush()?;
    read_answer(&mut std::io::stdin().lock()).map(|answer| is_yes(&answer))
}

/// Read one trimmed line; end of input reads as an empty answer.
pub fn read_answer(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}
