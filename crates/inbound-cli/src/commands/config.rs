use super::{ConfigAction, Context};
use anyhow::Result;
use colored::Colorize;

pub fn run(context: &Context, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show(context),
        ConfigAction::Set { key, value } => {
            let config = context.config_storage().set(&key, &value)?;
            tracing::info!("[Config] {} set to {:?}", key, value);
            println!("{} {} updated", "✓".green(), key.bold());
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn show(context: &Context) -> Result<()> {
    let secrets = context.secret_storage();
    let key_status = match secrets.gemini() {
        Ok(_) => "configured".green(),
        Err(e) => format!("missing ({e})").red(),
    };

    println!("{}", "# Effective settings".dimmed());
    print!("{}", toml::to_string_pretty(&context.config)?);
    println!();
    println!("{:<14} {}", "config file:".dimmed(), context.paths.config_file().display());
    println!("{:<14} {}", "secret file:".dimmed(), secrets.path().display());
    println!("{:<14} {}", "session file:".dimmed(), context.paths.session_file().display());
    println!("{:<14} {}", "logs:".dimmed(), context.paths.logs_dir().display());
    println!("{:<14} {}", "api key:".dimmed(), key_status);
    Ok(())
}
