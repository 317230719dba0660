use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let decks = app.state.decks();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = decks
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "id": d.id,
                        "name": d.name,
                        "createdAt": d.created_at.timestamp_millis(),
                        "isDefault": d.is_default(),
                        "progress": app.state.deck_progress(&d.id),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let name_w = decks
                .iter()
                .map(|d| d.name.chars().count())
                .max()
                .unwrap_or(4)
                .clamp(4, 30);

            println!("{:<name_w$} {:>6} {:>9} {:>5}", "Deck", "Cards", "Mastered", "%", name_w = name_w);
            println!(
                "{} {} {} {}",
                "\u{2500}".repeat(name_w),
                "\u{2500}".repeat(6),
                "\u{2500}".repeat(9),
                "\u{2500}".repeat(5)
            );

            for deck in decks {
                let progress = app.state.deck_progress(&deck.id);
                let name = format!("{:<name_w$}", terminal::truncate(&deck.name, name_w), name_w = name_w);
                let name = if deck.is_default() {
                    terminal::paint(&name, Color::BOLD, use_color)
                } else {
                    name
                };
                println!(
                    "{} {:>6} {:>9} {:>4}%",
                    name, progress.total_cards, progress.mastered_cards, progress.percent_mastered
                );
            }
        }
    }

    Ok(())
}
