use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let results = app.state.history(query);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Plain => {
            if results.is_empty() {
                if query.trim().is_empty() {
                    println!("No saved cards yet.");
                } else {
                    println!("No cards found for '{}'.", query);
                }
                return Ok(());
            }

            for card in &results {
                let deck = card
                    .deck_id
                    .as_deref()
                    .map(|id| app.deck_name(id))
                    .unwrap_or_else(|| "-".to_string());
                let definition = card
                    .primary_meaning()
                    .map(|m| m.definition.as_str())
                    .unwrap_or("");

                println!(
                    "{}  {:<24} {:<40} {}",
                    terminal::paint(&card.created_at.format("%Y-%m-%d").to_string(), Color::GRAY, use_color),
                    terminal::truncate(&card.term, 24),
                    terminal::truncate(definition, 40),
                    terminal::paint(&deck, Color::DIM, use_color)
                );
            }

            println!("\n{} cards", results.len());
        }
    }

    Ok(())
}
