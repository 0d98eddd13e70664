mod cli;

use std::io::IsTerminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cli::favorite::FavoriteAction;
use cli::generate::GenerateArgs;
use cli::history::HistoryAction;
use cli::interactive::InteractiveArgs;
use cli::App;

#[derive(Parser)]
#[command(
    name = "jrp",
    version,
    about = "Japanese random phrase generator",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Arguments for the default `generate` command
    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Generate phrases and save them to history
    #[command(visible_alias = "gen")]
    Generate(GenerateArgs),
    /// Generate phrases one at a time and decide what to keep
    #[command(visible_alias = "int")]
    Interactive(InteractiveArgs),
    /// Show, search and remove generated phrases
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Manage favorited phrases
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Download the word database
    Download,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = jrp::config::JrpConfig::load()?;

    // Log to stderr so stdout only carries phrases and tables.
    let filter =
        EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app = App::new(config);
    match cli.command {
        None => cli::generate::run(&app, &cli.generate),
        Some(Command::Generate(args)) => cli::generate::run(&app, &args),
        Some(Command::Interactive(args)) => cli::interactive::run(&app, &args),
        Some(Command::History { action }) => cli::history::run(&app, action),
        Some(Command::Favorite { action }) => cli::favorite::run(&app, action),
        Some(Command::Download) => cli::download::run(&app).await,
    }
}

fn print_error(e: &anyhow::Error) {
    let message = format!("{e:#}");
    if std::io::stderr().is_terminal() {
        eprintln!("\x1b[31mError: {message}\x1b[0m");
    } else {
        eprintln!("Error: {message}");
    }
}
