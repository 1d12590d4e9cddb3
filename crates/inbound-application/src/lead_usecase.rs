//! Lead search use cases: generate, find lookalikes, restore and clear.
//!
//! Every action takes the current [`AppState`] and returns the next one inside
//! a [`Dispatch`]. Failures never escape as `Err`; they land in
//! [`AppState::error`]. A failed generate leaves the result list empty, a
//! failed lookalike search keeps the existing leads.

use crate::in_flight::{Dispatch, InFlightGuard, Operation};
use crate::status_ticker::{Status, StatusTicker};
use inbound_core::backend::LeadBackend;
use inbound_core::lead::Lead;
use inbound_core::parser::parse_leads;
use inbound_core::prompt::{LookalikeRequest, PromptPair, build_generation_prompt, build_lookalike_prompt};
use inbound_core::query::{SearchQuery, is_excluded, parse_exclusions};
use inbound_core::session::SessionRepository;
use inbound_core::{AppState, InboundError, Result};
use std::sync::Arc;
use tokio::sync::watch;

pub struct LeadUseCase {
    backend: Arc<dyn LeadBackend>,
    sessions: Arc<dyn SessionRepository>,
    guard: InFlightGuard,
    ticker: StatusTicker,
    filter_exclusions: bool,
}

impl LeadUseCase {
    pub fn new(backend: Arc<dyn LeadBackend>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self {
            backend,
            sessions,
            guard: InFlightGuard::new(),
            ticker: StatusTicker::default(),
            filter_exclusions: true,
        }
    }

    /// Enables or disables dropping returned companies that match the
    /// exclusion list.
    pub fn with_exclusion_filter(mut self, enabled: bool) -> Self {
        self.filter_exclusions = enabled;
        self
    }

    pub fn with_ticker(mut self, ticker: StatusTicker) -> Self {
        self.ticker = ticker;
        self
    }

    /// Status messages while a request is pending.
    pub fn status(&self) -> watch::Receiver<Status> {
        self.ticker.subscribe()
    }

    pub fn in_flight(&self) -> Option<Operation> {
        self.guard.current()
    }

    /// Startup state: the stored session, or first-run defaults.
    pub async fn load_session(&self) -> AppState {
        match self.sessions.load().await {
            Ok(session) => AppState::from_session(session),
            Err(e) => {
                tracing::warn!("[LeadUseCase] Failed to load session: {}", e);
                AppState::default().failed(&e)
            }
        }
    }

    /// Runs a new search for `query`, replacing the current leads.
    pub async fn generate(&self, state: &AppState, query: SearchQuery) -> Dispatch<AppState> {
        let Some(_ticket) = self.guard.try_acquire(Operation::Generate) else {
            return Dispatch::Ignored;
        };

        let state = state.clone().with_query(query);
        if let Err(e) = state.query.validate() {
            tracing::info!("[LeadUseCase] Rejected query: {}", e);
            return Dispatch::Completed(state.failed(&e));
        }

        let state = state.begin_generate();
        tracing::info!(
            "[LeadUseCase] Generating leads (client={:?}, category={:?}, region={:?})",
            state.query.client(),
            state.query.category,
            state.query.region
        );

        let prompt = build_generation_prompt(&state.query);
        let exclusions = parse_exclusions(&state.query.exclusion_list);
        let result = self
            .run(&prompt)
            .await
            .map(|leads| self.apply_exclusions(leads, &exclusions));

        match result {
            Ok(leads) => {
                tracing::info!("[LeadUseCase] Generated {} leads", leads.len());
                let state = state.leads_generated(leads);
                self.persist(&state).await;
                Dispatch::Completed(state)
            }
            Err(e) => Dispatch::Completed(state.failed(&e)),
        }
    }

    /// Searches for companies similar to the lead at `seed_index` (position in
    /// `state.leads`) and appends them.
    pub async fn find_lookalikes(&self, state: &AppState, seed_index: usize) -> Dispatch<AppState> {
        let Some(_ticket) = self.guard.try_acquire(Operation::Lookalike { seed_index }) else {
            return Dispatch::Ignored;
        };

        let state = state.clone().begin_lookalike();
        let Some(seed) = state.leads.get(seed_index).cloned() else {
            let e = InboundError::Validation(format!(
                "There is no lead at position {} (have {}).",
                seed_index + 1,
                state.leads.len()
            ));
            return Dispatch::Completed(state.failed(&e));
        };

        tracing::info!(
            "[LeadUseCase] Finding lookalikes for '{}' (index {})",
            seed.company_name,
            seed_index
        );

        let prompt = build_lookalike_prompt(LookalikeRequest {
            seed: &seed,
            region: &state.query.region,
            department: &state.query.department,
            exclusion_list: &state.query.exclusion_list,
        });
        let exclusions = parse_exclusions(&state.query.exclusion_list);

        match self.run(&prompt).await {
            Ok(found) => {
                let found: Vec<Lead> = found
                    .into_iter()
                    .filter(|lead| {
                        !lead
                            .company_name
                            .trim()
                            .eq_ignore_ascii_case(seed.company_name.trim())
                    })
                    .collect();
                let found = self.apply_exclusions(found, &exclusions);
                tracing::info!("[LeadUseCase] Found {} lookalikes", found.len());
                let state = state.lookalikes_found(found);
                self.persist(&state).await;
                Dispatch::Completed(state)
            }
            Err(e) => Dispatch::Completed(state.failed(&e)),
        }
    }

    /// Forgets the stored session and returns the first-run state.
    pub async fn clear_session(&self) -> Result<AppState> {
        self.sessions.clear().await?;
        tracing::info!("[LeadUseCase] Session cleared");
        Ok(AppState::cleared())
    }

    /// Calls the backend and parses the reply, with the status ticker running.
    async fn run(&self, prompt: &PromptPair) -> Result<Vec<Lead>> {
        let ticker = self.ticker.start();
        let result = self.call_backend(prompt).await;
        ticker.stop().await;

        if let Err(e) = &result {
            tracing::warn!("[LeadUseCase] {} request failed: {}", self.backend.name(), e);
            if let Some(raw) = e.raw_response() {
                tracing::debug!("[LeadUseCase] Unparsable response ({} chars): {}", raw.len(), raw);
            }
        }
        result
    }

    async fn call_backend(&self, prompt: &PromptPair) -> Result<Vec<Lead>> {
        let raw = self.backend.generate(prompt).await?;
        tracing::debug!("[LeadUseCase] Backend returned {} chars", raw.len());
        parse_leads(&raw)
    }

    fn apply_exclusions(&self, leads: Vec<Lead>, exclusions: &[&str]) -> Vec<Lead> {
        if !self.filter_exclusions || exclusions.is_empty() {
            return leads;
        }
        let before = leads.len();
        let kept: Vec<Lead> = leads
            .into_iter()
            .filter(|lead| !is_excluded(&lead.company_name, exclusions))
            .collect();
        if kept.len() < before {
            tracing::info!(
                "[LeadUseCase] Dropped {} excluded companies",
                before - kept.len()
            );
        }
        kept
    }

    async fn persist(&self, state: &AppState) {
        if let Err(e) = self.sessions.save(&state.to_session()).await {
            tracing::warn!("[LeadUseCase] Failed to save session: {}", e);
        }
    }
}
