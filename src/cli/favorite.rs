//! CLI `favorite` subcommands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use jrp::history::{FavoriteRepository, MatchMode};

use super::{confirm, print_rows, report_removal, App, SearchArgs, ShowArgs};

const EMPTY_NOTICE: &str = "No favorite found.";

#[derive(Subcommand, Debug, Clone)]
pub enum FavoriteAction {
    /// Favorite phrases by history id
    Add(AddArgs),
    /// Show the most recent favorites
    Show(ShowArgs),
    /// Search favorites by keyword
    Search(SearchArgs),
    /// Unfavorite phrases by id
    Remove(RemoveArgs),
    /// Unfavorite every phrase
    Clear(ClearArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// History ids to favorite
    #[arg(required = true, value_name = "ID")]
    pub ids: Vec<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    /// History ids to unfavorite
    #[arg(required_unless_present = "all", value_name = "ID")]
    pub ids: Vec<i64>,

    /// Unfavorite every phrase
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub no_confirm: bool,
}

pub fn run(app: &App, action: FavoriteAction) -> Result<()> {
    let favorites = app.favorites();
    let default_number = app.config.history.default_number;

    match action {
        FavoriteAction::Add(args) => {
            let added = favorites
                .add_favorite_by_ids(&args.ids)
                .context("failed to add favorites")?;
            if added == 0 {
                println!("Nothing was favorited.");
            } else {
                println!("Favorited {added} phrase(s).");
            }
            Ok(())
        }
        FavoriteAction::Show(args) => {
            let rows = if args.all {
                favorites.get_all_favorite()
            } else {
                favorites.get_favorite_with_number(args.count(default_number))
            }
            .context("failed to read favorites")?;
            print_rows(&rows, args.plain, EMPTY_NOTICE);
            Ok(())
        }
        FavoriteAction::Search(args) => {
            let mode = MatchMode::from_and_flag(args.and);
            let rows = if args.all {
                favorites.search_all_favorite(&args.keywords, mode)
            } else {
                favorites.search_favorite_with_number(args.count(default_number), &args.keywords, mode)
            }
            .context("failed to search favorites")?;
            print_rows(&rows, args.plain, EMPTY_NOTICE);
            Ok(())
        }
        FavoriteAction::Remove(args) => {
            let status = if args.all {
                favorites.remove_favorite_all()
            } else {
                favorites.remove_favorite_by_ids(&args.ids)
            };
            report_removal(status)
        }
        FavoriteAction::Clear(args) => {
            if !args.no_confirm && !confirm("Unfavorite every phrase?")? {
                println!("Cancelled.");
                return Ok(());
            }
            report_removal(favorites.remove_favorite_all())
        }
    }
}
