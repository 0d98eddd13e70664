//! CLI `interactive` command: generate one phrase at a time and let the user
//! decide whether to save, favorite or skip it.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use jrp::generator::{GenerateOptions, Generator};
use jrp::history::{HistoryRepository, NewHistory};
use jrp::words::WordSource;

use super::{read_answer, App};

const PROMPT_HELP: &str = "u: favorite & continue  i: favorite & exit  \
j: save & continue  k: save & exit  m: skip & continue  other: skip & exit";

#[derive(Args, Debug, Clone, Default)]
pub struct InteractiveArgs {
    /// Use this word as the prefix of every phrase
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Use this word as the suffix of every phrase
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Print phrases and the prompt only
    #[arg(short = 'P', long)]
    pub plain: bool,
}

/// What to do with the phrase just shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    FavoriteAndContinue,
    FavoriteAndExit,
    SaveAndContinue,
    SaveAndExit,
    SkipAndContinue,
    SkipAndExit,
}

impl Answer {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "u" => Self::FavoriteAndContinue,
            "i" => Self::FavoriteAndExit,
            "j" => Self::SaveAndContinue,
            "k" => Self::SaveAndExit,
            "m" => Self::SkipAndContinue,
            _ => Self::SkipAndExit,
        }
    }

    /// Favoriting implies saving.
    pub fn saves(self) -> bool {
        !matches!(self, Self::SkipAndContinue | Self::SkipAndExit)
    }

    pub fn favorites(self) -> bool {
        matches!(self, Self::FavoriteAndContinue | Self::FavoriteAndExit)
    }

    pub fn continues(self) -> bool {
        matches!(
            self,
            Self::FavoriteAndContinue | Self::SaveAndContinue | Self::SkipAndContinue
        )
    }
}

pub fn run(app: &App, args: &InteractiveArgs) -> Result<()> {
    let source = WordSource::open(app.paths.word_db_path())?;
    let mut generator = Generator::from_source(&source).context("failed to load word pools")?;
    source.close()?;

    let options = GenerateOptions {
        prefix: args.prefix.clone(),
        suffix: args.suffix.clone(),
    };
    let history = app.history();
    let mut input = std::io::stdin().lock();

    if !args.plain {
        println!("{PROMPT_HELP}");
    }
    loop {
        let phrase = generator
            .generate(1, &options)?
            .pop()
            .context("no phrase was generated")?;
        println!("{}", phrase.phrase);
        print!("> ");
        std::io::stdout().flush()?;

        let answer = Answer::parse(&read_answer(&mut input)?);
        tracing::debug!(?answer, "interactive answer");

        if answer.favorites() {
            history
                .save_favorited_history(&[NewHistory::from(phrase)])
                .context("failed to save favorite")?;
            notice(args.plain, "Favorited.");
        } else if answer.saves() {
            history
                .save_history(&[NewHistory::from(phrase)])
                .context("failed to save history")?;
            notice(args.plain, "Saved.");
        } else {
            notice(args.plain, "Skipped.");
        }

        if !answer.continues() {
            break;
        }
    }
    Ok(())
}

fn notice(plain: bool, message: &str) {
    if !plain {
        println!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_keys() {
        assert_eq!(Answer::parse("u"), Answer::FavoriteAndContinue);
        assert_eq!(Answer::parse("i"), Answer::FavoriteAndExit);
        assert_eq!(Answer::parse("j"), Answer::SaveAndContinue);
        assert_eq!(Answer::parse("k"), Answer::SaveAndExit);
        assert_eq!(Answer::parse(" m\n"), Answer::SkipAndContinue);
        assert_eq!(Answer::parse(""), Answer::SkipAndExit);
        assert_eq!(Answer::parse("q"), Answer::SkipAndExit);
        // keys are case-sensitive
        assert_eq!(Answer::parse("U"), Answer::SkipAndExit);
    }

    #[test]
    fn favoriting_saves() {
        for answer in [Answer::FavoriteAndContinue, Answer::FavoriteAndExit] {
            assert!(answer.saves());
            assert!(answer.favorites());
        }
        assert!(Answer::SaveAndExit.saves());
        assert!(!Answer::SaveAndExit.favorites());
        assert!(!Answer::SkipAndContinue.saves());
    }

    #[test]
    fn only_continue_answers_loop() {
        assert!(Answer::FavoriteAndContinue.continues());
        assert!(Answer::SaveAndContinue.continues());
        assert!(Answer::SkipAndContinue.continues());
        assert!(!Answer::FavoriteAndExit.continues());
        assert!(!Answer::SaveAndExit.continues());
        assert!(!Answer::SkipAndExit.continues());
    }
}
