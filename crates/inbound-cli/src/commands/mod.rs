pub mod clear;
pub mod config;
pub mod docs;
pub mod export;
pub mod generate;
pub mod init;
pub mod lookalikes;
pub mod show;
pub mod table;

use anyhow::Result;
use async_trait::async_trait;
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use inbound_application::{Dispatch, LeadUseCase};
use inbound_core::backend::LeadBackend;
use inbound_core::config::AppConfig;
use inbound_core::prompt::PromptPair;
use inbound_core::{AppState, InboundError, SearchPlatform, SearchQuery};
use inbound_infrastructure::{
    ConfigStorage, InboundPaths, JsonSessionRepository, SecretStorage,
};
use inbound_interaction::GeminiApiAgent;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a command needs: resolved paths and the loaded settings.
pub struct Context {
    pub paths: InboundPaths,
    pub config: AppConfig,
}

impl Context {
    pub fn new(paths: InboundPaths) -> Result<Self> {
        let config = ConfigStorage::new(paths.config_file()).load()?;
        Ok(Self { paths, config })
    }

    pub fn config_storage(&self) -> ConfigStorage {
        ConfigStorage::new(self.paths.config_file())
    }

    pub fn secret_storage(&self) -> SecretStorage {
        SecretStorage::new(self.paths.secret_file())
    }

    /// Builds the use case against Gemini.
    ///
    /// Without a usable API key the use case still works for session
    /// commands; searches then fail with the configuration error.
    pub fn usecase(&self) -> LeadUseCase {
        let backend: Arc<dyn LeadBackend> =
            match GeminiApiAgent::from_config(&self.secret_storage(), &self.config) {
                Ok(agent) => {
                    tracing::debug!("[Context] Using Gemini model {}", agent.model());
                    Arc::new(agent)
                }
                Err(e) => {
                    tracing::debug!("[Context] Gemini backend unavailable: {}", e);
                    Arc::new(UnavailableBackend(e))
                }
            };
        let sessions = Arc::new(JsonSessionRepository::new(self.paths.session_file()));
        LeadUseCase::new(backend, sessions).with_exclusion_filter(self.config.filter_exclusions)
    }
}

/// Stand-in backend that reports why no real backend could be built.
struct UnavailableBackend(InboundError);

#[async_trait]
impl LeadBackend for UnavailableBackend {
    async fn generate(&self, _prompt: &PromptPair) -> inbound_core::Result<String> {
        Err(self.0.clone())
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

/// Flags of `inbound generate`. Anything left out keeps the stored value.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Company to deep-dive; pass an empty string to search by category only
    #[arg(long)]
    pub client: Option<String>,

    /// Industry to search when no client is given
    #[arg(long)]
    pub category: Option<String>,

    /// Department to find contacts in
    #[arg(long)]
    pub department: Option<String>,

    /// Region the companies are based in
    #[arg(long)]
    pub region: Option<String>,

    /// Platform to search; repeat for several
    #[arg(long = "platform", value_enum)]
    pub platforms: Vec<PlatformArg>,

    /// With --client, also find up to 5 similar companies
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub similar: Option<bool>,

    /// Ask for a complete outreach email per lead
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub compose_email: Option<bool>,

    /// Comma-separated companies to leave out
    #[arg(long)]
    pub exclude: Option<String>,
}

impl GenerateArgs {
    /// Overlays the given flags on the stored query.
    pub fn apply(self, mut query: SearchQuery) -> SearchQuery {
        if let Some(client) = self.client {
            query.client_name = client;
        }
        if let Some(category) = self.category {
            query.category = category;
        }
        if let Some(department) = self.department {
            query.department = department;
        }
        if let Some(region) = self.region {
            query.region = region;
        }
        if !self.platforms.is_empty() {
            query.search_platforms = self.platforms.into_iter().map(SearchPlatform::from).collect();
        }
        if let Some(similar) = self.similar {
            query.include_similar_companies = similar;
        }
        if let Some(compose_email) = self.compose_email {
            query.compose_email = compose_email;
        }
        if let Some(exclude) = self.exclude {
            query.exclusion_list = exclude;
        }
        query
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    #[value(name = "generalWeb", alias = "web")]
    Web,
    #[value(name = "linkedIn", alias = "linkedin")]
    Linkedin,
    #[value(name = "socialMedia", alias = "social")]
    Social,
}

impl From<PlatformArg> for SearchPlatform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Web => SearchPlatform::GeneralWeb,
            PlatformArg::Linkedin => SearchPlatform::LinkedIn,
            PlatformArg::Social => SearchPlatform::SocialMedia,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(short, long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// File to write instead of the default in the export directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
    Clipboard,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective settings and file locations
    Show,
    /// Change one setting
    Set {
        /// One of: model, grounding, request_timeout_secs, filter_exclusions, export_dir
        key: String,
        value: String,
    },
}

/// Turns the result of a search action into command output.
///
/// A recorded error becomes the command's error; an ignored dispatch means
/// another search is still running.
pub fn finish(dispatch: Dispatch<AppState>) -> Result<AppState> {
    let Some(state) = dispatch.completed() else {
        anyhow::bail!("A search is already running");
    };
    if let Some(message) = &state.error {
        anyhow::bail!("{}", message);
    }
    Ok(state)
}

/// Awaits `action`, echoing status messages to stderr while it runs.
pub async fn with_status<F: Future>(usecase: &LeadUseCase, action: F) -> F::Output {
    let mut status = usecase.status();
    let printer = tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let current = *status.borrow_and_update();
            if let Some(message) = current {
                eprintln!("{} {}", "*".cyan(), message.dimmed());
            }
        }
    });
    let output = action.await;
    printer.abort();
    output
}

pub fn print_empty_hint() {
    println!(
        "{}",
        "No leads yet. Run `inbound generate` to start a search.".yellow()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_flags_keep_stored_values() {
        let stored = SearchQuery {
            client_name: "Acme Foods".into(),
            region: "USA".into(),
            exclusion_list: "Initech".into(),
            include_similar_companies: true,
            ..SearchQuery::default()
        };
        let args = GenerateArgs {
            department: Some("Sales".into()),
            platforms: vec![PlatformArg::Social, PlatformArg::Web],
            similar: Some(false),
            ..GenerateArgs::default()
        };

        let query = args.apply(stored.clone());
        assert_eq!(query.client_name, "Acme Foods");
        assert_eq!(query.region, "USA");
        assert_eq!(query.exclusion_list, "Initech");
        assert_eq!(query.department, "Sales");
        assert!(!query.include_similar_companies);
        assert_eq!(
            query.search_platforms.into_iter().collect::<Vec<_>>(),
            vec![SearchPlatform::GeneralWeb, SearchPlatform::SocialMedia]
        );
    }

    #[test]
    fn empty_client_switches_to_category_search() {
        let stored = SearchQuery {
            client_name: "Acme Foods".into(),
            ..SearchQuery::default()
        };
        let args = GenerateArgs {
            client: Some(String::new()),
            category: Some("Retail".into()),
            ..GenerateArgs::default()
        };
        let query = args.apply(stored);
        assert_eq!(query.client(), None);
        assert_eq!(query.category, "Retail");
    }

    #[test]
    fn cli_flags_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: GenerateArgs,
        }

        let parsed = Wrapper::parse_from([
            "generate",
            "--client",
            "InnovateTech",
            "--platform",
            "linkedin",
            "--platform",
            "generalWeb",
            "--similar",
        ]);
        assert_eq!(parsed.args.client.as_deref(), Some("InnovateTech"));
        assert_eq!(parsed.args.platforms, vec![PlatformArg::Linkedin, PlatformArg::Web]);
        assert_eq!(parsed.args.similar, Some(true));
        assert_eq!(parsed.args.compose_email, None);
    }
}
