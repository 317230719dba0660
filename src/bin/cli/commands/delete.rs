use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, card_id: &str, format: &OutputFormat) -> Result<()> {
    let removed = app.state.delete_card(card_id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "deleted": removed }));
        }
        OutputFormat::Plain => match removed {
            Some(card) => println!("Deleted '{}' ({})", card.term, card.id),
            None => println!("No card with id {}", card_id),
        },
    }

    Ok(())
}
