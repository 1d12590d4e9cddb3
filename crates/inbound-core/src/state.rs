//! Centrally owned application state.
//!
//! Actions take the current [`AppState`] by value and return the next one.

use crate::error::InboundError;
use crate::lead::Lead;
use crate::query::SearchQuery;
use crate::session::Session;
use std::time::Duration;

/// Messages cycled while a search is in flight.
pub const LOADING_MESSAGES: [&str; 7] = [
    "Scanning web for expansion signals...",
    "Analyzing company data...",
    "Cross-referencing LinkedIn profiles...",
    "Identifying key decision-makers...",
    "Compiling deep-dive analysis...",
    "Scoring lead potential...",
    "Finalizing results...",
];

pub const STATUS_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub query: SearchQuery,
    pub leads: Vec<Lead>,
    /// User-facing message of the last failed action.
    pub error: Option<String>,
}

impl AppState {
    /// Restores state from a stored session, or the first-run defaults.
    pub fn from_session(session: Option<Session>) -> Self {
        match session {
            Some(session) => Self {
                query: session.query,
                leads: session.leads,
                error: None,
            },
            None => Self::default(),
        }
    }

    pub fn to_session(&self) -> Session {
        Session::new(self.query.clone(), self.leads.clone())
    }

    pub fn with_query(self, query: SearchQuery) -> Self {
        Self { query, ..self }
    }

    /// A new search starts from an empty result list.
    pub fn begin_generate(self) -> Self {
        Self {
            leads: Vec::new(),
            error: None,
            ..self
        }
    }

    pub fn begin_lookalike(self) -> Self {
        Self { error: None, ..self }
    }

    /// Replaces the result list.
    pub fn leads_generated(self, leads: Vec<Lead>) -> Self {
        Self {
            leads,
            error: None,
            ..self
        }
    }

    /// Appends lookalike results after the existing leads.
    pub fn lookalikes_found(mut self, found: Vec<Lead>) -> Self {
        self.leads.extend(found);
        self.error = None;
        self
    }

    /// Records a failure; the lead list is left as it was.
    pub fn failed(self, error: &InboundError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..self
        }
    }

    pub fn cleared() -> Self {
        Self::default()
    }
}
