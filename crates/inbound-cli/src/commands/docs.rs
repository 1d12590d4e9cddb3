use anyhow::{Context, Result};
use colored::Colorize;
use inbound_core::docs::render_documentation;
use std::path::Path;

pub fn run(output: Option<&Path>) -> Result<()> {
    let doc = render_documentation();
    match output {
        Some(path) => {
            std::fs::write(path, doc)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Documentation written to {}", "✓".green(), path.display());
        }
        None => print!("{doc}"),
    }
    Ok(())
}
