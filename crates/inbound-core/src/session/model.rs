use crate::lead::Lead;
use crate::query::SearchQuery;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted `{leads, query}` pair.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub query: SearchQuery,
    /// When the session was last written. Absent in older files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(query: SearchQuery, leads: Vec<Lead>) -> Self {
        Self {
            leads,
            query,
            saved_at: None,
        }
    }

    /// Copy stamped with the current time.
    pub fn stamped(mut self) -> Self {
        self.saved_at = Some(Utc::now());
        self
    }
}
