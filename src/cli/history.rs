//! CLI `history` subcommands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use jrp::history::{HistoryRepository, MatchMode, Protection};

use super::{confirm, print_rows, report_removal, App, SearchArgs, ShowArgs};

const EMPTY_NOTICE: &str = "No history found.";

#[derive(Subcommand, Debug, Clone)]
pub enum HistoryAction {
    /// Show the most recent phrases
    Show(ShowArgs),
    /// Search phrases by keyword
    Search(SearchArgs),
    /// Remove phrases by id
    Remove(RemoveArgs),
    /// Remove every phrase
    Clear(ClearArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    /// History ids to remove
    #[arg(required_unless_present = "all", value_name = "ID")]
    pub ids: Vec<i64>,

    /// Remove every phrase
    #[arg(short, long)]
    pub all: bool,

    /// Also remove favorited phrases
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ClearArgs {
    /// Also remove favorited phrases
    #[arg(short, long)]
    pub force: bool,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub no_confirm: bool,
}

pub fn run(app: &App, action: HistoryAction) -> Result<()> {
    let history = app.history();
    let default_number = app.config.history.default_number;

    match action {
        HistoryAction::Show(args) => {
            let rows = if args.all {
                history.get_all_history()
            } else {
                history.get_history_with_number(args.count(default_number))
            }
            .context("failed to read history")?;
            print_rows(&rows, args.plain, EMPTY_NOTICE);
            Ok(())
        }
        HistoryAction::Search(args) => {
            let mode = MatchMode::from_and_flag(args.and);
            let rows = if args.all {
                history.search_all_history(&args.keywords, mode)
            } else {
                history.search_history_with_number(args.count(default_number), &args.keywords, mode)
            }
            .context("failed to search history")?;
            print_rows(&rows, args.plain, EMPTY_NOTICE);
            Ok(())
        }
        HistoryAction::Remove(args) => {
            let protection = Protection::from_force_flag(args.force);
            let status = if args.all {
                history.remove_history_all(protection)
            } else {
                history.remove_history_by_ids(&args.ids, protection)
            };
            report_removal(status)
        }
        HistoryAction::Clear(args) => {
            if !args.no_confirm {
                let question = if args.force {
                    "Remove ALL history, including favorites?"
                } else {
                    "Remove all history except favorites?"
                };
                if !confirm(question)? {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            report_removal(history.remove_history_all(Protection::from_force_flag(args.force)))
        }
    }
}
