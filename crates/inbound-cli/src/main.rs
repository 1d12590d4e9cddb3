use anyhow::Result;
use clap::{Parser, Subcommand};
use inbound_infrastructure::InboundPaths;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{ConfigAction, Context, ExportArgs, GenerateArgs};

#[derive(Parser)]
#[command(name = "inbound", version)]
#[command(about = "Inbound - find international companies expanding into India", long_about = None)]
struct Cli {
    /// Directory holding config.toml, secret.json and logs/
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Directory holding session.json
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Also print info-level logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for leads; omitted flags reuse the last search
    Generate(GenerateArgs),
    /// Find companies similar to a lead from the results table
    Lookalikes {
        /// Row number as shown by `inbound show`
        index: usize,
    },
    /// Show the stored leads
    Show {
        /// Include the deep-dive panel for every lead
        #[arg(long)]
        details: bool,
    },
    /// Export the stored leads
    Export(ExportArgs),
    /// Forget the stored session
    Clear,
    /// Print the user guide and prompt architecture as Markdown
    Docs {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create secret.json and config.toml templates
    Init,
    /// Show or change settings in config.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = InboundPaths::resolve(cli.config_dir, cli.data_dir)?;
    let _log_guard = init_logging(&paths, cli.verbose);
    tracing::debug!("[Main] Using config dir {}", paths.config_dir().display());

    let context = Context::new(paths)?;

    match cli.command {
        Commands::Generate(args) => commands::generate::run(&context, args).await?,
        Commands::Lookalikes { index } => commands::lookalikes::run(&context, index).await?,
        Commands::Show { details } => commands::show::run(&context, details).await?,
        Commands::Export(args) => commands::export::run(&context, args).await?,
        Commands::Clear => commands::clear::run(&context).await?,
        Commands::Docs { output } => commands::docs::run(output.as_deref())?,
        Commands::Init => commands::init::run(&context)?,
        Commands::Config { action } => commands::config::run(&context, action)?,
    }

    Ok(())
}

/// Installs stderr logging and a daily log file under the logs directory.
///
/// The file receives everything `RUST_LOG` (default `inbound=info`) allows;
/// stderr only shows warnings unless `verbose` is set.
fn init_logging(paths: &InboundPaths, verbose: bool) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inbound=info"));
    let stderr_level = if verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    };
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_level);

    let logs_dir = paths.logs_dir();
    let (file_layer, guard) = match std::fs::create_dir_all(&logs_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(&logs_dir, "inbound.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("Logging to file disabled ({}): {}", logs_dir.display(), e);
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .ok();

    guard
}
