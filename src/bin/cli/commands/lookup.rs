use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use lingocard_lib::app::LookupOutcome;
use lingocard_lib::selector::TargetTab;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub async fn run(
    app: &mut App,
    term: &str,
    deck_name: Option<&str>,
    tab: TargetTab,
    response: Option<PathBuf>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let target = deck_name.map(|name| app.find_deck(name)).transpose()?;
    let generator = app.generator(response)?;

    let auto_saved = match app.state.lookup(generator.as_ref(), term).await? {
        LookupOutcome::Skipped => bail!("Nothing to look up"),
        LookupOutcome::Failed { message } => bail!("{}", message),
        LookupOutcome::Found { saved } => saved,
    };
    app.state.set_tab(tab);

    let saved = match &target {
        Some(deck) => app
            .state
            .save_current(&deck.id)
            .context(format!("Failed to save into deck '{}'", deck.name))?,
        None => Vec::new(),
    };

    let current = app.state.current().context("No lookup result")?;
    let meanings = app.state.visible_meanings();
    let saved_in = app.state.saved_deck_ids();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "card": current.card,
                "tab": current.tab,
                "visibleMeanings": meanings,
                "defaultSaveDeckId": app.state.default_save_deck(),
                "savedDeckIds": saved_in,
                "createdCardIds": auto_saved.iter().chain(saved.iter()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::render_card(&current.card, &meanings, use_color));
            println!();

            if saved_in.is_empty() {
                let hint = match app.state.default_save_deck() {
                    Some(deck_id) => format!("Not saved yet. Save with --deck \"{}\"", app.deck_name(&deck_id)),
                    None => "Not saved yet.".to_string(),
                };
                println!("{}", terminal::paint(&hint, Color::DIM, use_color));
            } else {
                let names: Vec<String> = saved_in.iter().map(|id| app.deck_name(id)).collect();
                println!(
                    "{} {}",
                    terminal::paint("Saved in:", Color::GREEN, use_color),
                    names.join(", ")
                );
            }
        }
    }

    Ok(())
}
