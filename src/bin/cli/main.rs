mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lingocard_lib::selector::TargetTab;

#[derive(Parser)]
#[command(name = "lingocard", about = "Vocabulary cards from AI lookups", version)]
struct Cli {
    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a term and save the generated card
    Lookup {
        /// Word or phrase to look up
        term: String,
        /// Also save into this deck (case-insensitive prefix match)
        #[arg(long)]
        deck: Option<String>,
        /// Target language for Japanese terms (english, korean)
        #[arg(long, default_value = "english")]
        tab: TargetTab,
        /// Read the generation response from a file instead of the service
        #[arg(long)]
        response: Option<PathBuf>,
    },

    /// Recognize handwritten text in a PNG image
    Recognize {
        /// Path to the image
        image: PathBuf,
    },

    /// List decks with card counts and progress
    Decks,

    /// Create or show a deck
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Search saved cards, most recent first
    History {
        /// Search query (matches terms, definitions and examples)
        query: Option<String>,
    },

    /// Review the cards of a deck
    Review {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Seed for the card order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Delete a saved card
    Delete {
        /// Card id
        card_id: String,
    },
}

#[derive(Subcommand)]
enum DeckCommand {
    /// Create a new deck
    New {
        /// Deck name
        name: String,
    },

    /// Show the cards in a deck
    Show {
        /// Deck name (case-insensitive prefix match)
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let mut app = app::App::new(cli.config.as_deref())?;

    match cli.command {
        Command::Lookup { term, deck, tab, response } => {
            commands::lookup::run(&mut app, &term, deck.as_deref(), tab, response, &cli.format, use_color)
                .await?;
        }
        Command::Recognize { image } => {
            commands::recognize::run(&app, &image, &cli.format).await?;
        }
        Command::Decks => {
            commands::decks::run(&app, &cli.format, use_color)?;
        }
        Command::Deck(DeckCommand::New { name }) => {
            commands::deck::run_new(&mut app, &name, &cli.format)?;
        }
        Command::Deck(DeckCommand::Show { name }) => {
            commands::deck::run_show(&app, &name, &cli.format, use_color)?;
        }
        Command::History { query } => {
            commands::history::run(&app, query.as_deref().unwrap_or(""), &cli.format, use_color)?;
        }
        Command::Review { deck, seed } => {
            commands::review::run(&mut app, &deck, seed, use_color)?;
        }
        Command::Delete { card_id } => {
            commands::delete::run(&mut app, &card_id, &cli.format)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
