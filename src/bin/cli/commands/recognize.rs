use std::path::Path;

use anyhow::{Context, Result};

use lingocard_lib::generation::{GeminiClient, HandwritingRecognizer};

use crate::app::App;
use crate::OutputFormat;

pub async fn run(app: &App, image: &Path, format: &OutputFormat) -> Result<()> {
    let png = tokio::fs::read(image)
        .await
        .context(format!("Failed to read image {:?}", image))?;

    let client = GeminiClient::new(&app.config.gemini)
        .context("Failed to set up the Gemini client (set GEMINI_API_KEY or gemini.api_key)")?;
    let text = client
        .recognize(&png)
        .await
        .context("Handwriting recognition failed")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "text": text }));
        }
        OutputFormat::Plain => match text {
            Some(text) => println!("{}", text),
            None => eprintln!("Could not recognize handwriting. Please try again."),
        },
    }

    Ok(())
}
