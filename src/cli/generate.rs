//! CLI `generate` command (also the default when no subcommand is given).

use anyhow::{Context, Result};
use clap::Args;

use jrp::count::resolve_count;
use jrp::generator::{self, GenerateOptions};
use jrp::history::{HistoryRepository, NewHistory};
use jrp::render::{self, RenderMode};
use jrp::words::WordSource;

use super::App;

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// How many phrases to generate
    #[arg(value_name = "NUMBER")]
    pub args: Vec<String>,

    /// How many phrases to generate
    #[arg(short, long)]
    pub number: Option<i64>,

    /// Use this word as the prefix of every phrase
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Use this word as the suffix of every phrase
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Print phrases only
    #[arg(short = 'P', long)]
    pub plain: bool,

    /// Print without saving to history
    #[arg(short, long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
        }
    }
}

pub fn run(app: &App, args: &GenerateArgs) -> Result<()> {
    let n = resolve_count(&args.args, args.number.unwrap_or(0), app.config.generate.default_number);
    if n <= 0 {
        tracing::debug!(n, "nothing to generate");
        return Ok(());
    }

    let source = WordSource::open(app.paths.word_db_path())?;
    let phrases = generator::generate(n, &source, &args.options())
        .context("failed to generate phrases")?;
    source.close()?;

    if args.dry_run {
        let texts: Vec<&str> = phrases.iter().map(|p| p.phrase.as_str()).collect();
        print!("{}", render::render_phrases(&texts));
        return Ok(());
    }

    let records: Vec<NewHistory> = phrases.into_iter().map(NewHistory::from).collect();
    let saved = app
        .history()
        .save_history(&records)
        .context("failed to save history")?;
    print!("{}", render::render(&saved, RenderMode::from_plain_flag(args.plain)));
    Ok(())
}
