use super::Context;
use anyhow::{Context as _, Result};
use colored::Colorize;

pub fn run(context: &Context) -> Result<()> {
    let (secret_path, created) = context
        .paths
        .ensure_secret_file()
        .context("Failed to create secret.json")?;
    if created {
        println!("{} Created {}", "✓".green(), secret_path.display());
        println!("  Add your Gemini API key there, or export GEMINI_API_KEY.");
    } else {
        println!("{} {} already exists", "-".dimmed(), secret_path.display());
    }

    let storage = context.config_storage();
    if storage.exists() {
        println!("{} {} already exists", "-".dimmed(), storage.path().display());
    } else {
        storage.save(&context.config)?;
        println!("{} Created {}", "✓".green(), storage.path().display());
    }
    Ok(())
}
