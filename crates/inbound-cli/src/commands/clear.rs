use super::Context;
use anyhow::Result;
use colored::Colorize;

pub async fn run(context: &Context) -> Result<()> {
    context.usecase().clear_session().await?;
    println!("{} Session cleared", "✓".green());
    Ok(())
}
