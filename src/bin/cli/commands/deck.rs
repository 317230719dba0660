use anyhow::{bail, Result};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run_new(app: &mut App, name: &str, format: &OutputFormat) -> Result<()> {
    let Some(deck_id) = app.state.create_deck(name)? else {
        bail!("Deck name must not be empty");
    };

    match format {
        OutputFormat::Json => {
            let deck = app.state.deck(&deck_id);
            println!("{}", serde_json::to_string_pretty(&deck)?);
        }
        OutputFormat::Plain => {
            println!("Created deck '{}' ({})", name.trim(), deck_id);
        }
    }

    Ok(())
}

pub fn run_show(app: &App, name: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.find_deck(name)?;
    let cards = app.state.deck_cards(&deck.id);
    let progress = app.state.deck_progress(&deck.id);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": deck,
                "progress": progress,
                "cards": cards,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::paint(&deck.name, Color::BOLD, use_color));
            println!(
                "{}",
                terminal::paint(
                    &format!(
                        "{} cards, {} mastered ({}%)",
                        progress.total_cards, progress.mastered_cards, progress.percent_mastered
                    ),
                    Color::DIM,
                    use_color
                )
            );

            if cards.is_empty() {
                println!("\nNo cards in this deck yet.");
                return Ok(());
            }

            println!();
            for card in &cards {
                let definition = card
                    .primary_meaning()
                    .map(|m| m.definition.as_str())
                    .unwrap_or("");
                let status = format!("{:<9}", card.status.to_string());
                println!(
                    "{} {:<24} {}  {}",
                    terminal::paint(&status, terminal::status_color(card.status), use_color),
                    terminal::truncate(&card.term, 24),
                    terminal::truncate(definition, 40),
                    terminal::paint(&card.id, Color::GRAY, use_color)
                );
            }
        }
    }

    Ok(())
}
