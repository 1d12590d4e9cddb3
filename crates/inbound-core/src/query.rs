//! The search request a user submits.

use crate::error::{InboundError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

pub const REGION_OPTIONS: &[&str] = &[
    "Global",
    "APAC",
    "UK/Europe",
    "USA",
    "Canada",
    "MENA",
    "Africa",
];

pub const DEPARTMENT_OPTIONS: &[&str] = &[
    "Marketing",
    "International Marketing",
    "Sales",
    "CEO",
    "Business Head",
    "COO",
];

pub const CATEGORY_OPTIONS: &[&str] = &[
    "Food",
    "Retail",
    "Technology",
    "Travel & Tourism",
    "Gaming & Betting",
];

/// Sources the backend is told to search.
///
/// Variant order is the canonical order in which platform clauses appear in
/// a prompt.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SearchPlatform {
    GeneralWeb,
    LinkedIn,
    SocialMedia,
}

impl SearchPlatform {
    /// Label shown next to the platform checkbox.
    pub fn label(&self) -> &'static str {
        match self {
            SearchPlatform::GeneralWeb => "In-depth Web Search",
            SearchPlatform::LinkedIn => "LinkedIn",
            SearchPlatform::SocialMedia => "Social Media Search (FB, X, Instagram)",
        }
    }

    pub fn all() -> BTreeSet<SearchPlatform> {
        SearchPlatform::iter().collect()
    }
}

/// A lead search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQuery {
    pub client_name: String,
    pub category: String,
    pub department: String,
    pub region: String,
    pub search_platforms: BTreeSet<SearchPlatform>,
    pub include_similar_companies: bool,
    pub compose_email: bool,
    /// Comma-separated company names, kept as typed.
    pub exclusion_list: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            category: CATEGORY_OPTIONS[0].to_string(),
            department: DEPARTMENT_OPTIONS[0].to_string(),
            region: REGION_OPTIONS[0].to_string(),
            search_platforms: [SearchPlatform::GeneralWeb, SearchPlatform::LinkedIn]
                .into_iter()
                .collect(),
            include_similar_companies: false,
            compose_email: false,
            exclusion_list: String::new(),
        }
    }
}

impl SearchQuery {
    /// Checks the query can be dispatched.
    ///
    /// A query needs a client name or a category, and at least one platform.
    pub fn validate(&self) -> Result<()> {
        let has_subject = !self.client_name.trim().is_empty() || !self.category.trim().is_empty();
        if !has_subject || self.search_platforms.is_empty() {
            return Err(InboundError::invalid_query());
        }
        Ok(())
    }

    /// Trimmed client name, or `None` when blank.
    pub fn client(&self) -> Option<&str> {
        let name = self.client_name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Non-empty entries of the exclusion list, trimmed, in input order.
    pub fn exclusions(&self) -> Vec<&str> {
        parse_exclusions(&self.exclusion_list)
    }
}

/// Splits a comma-separated exclusion list.
pub fn parse_exclusions(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Case-insensitive containment check used for local exclusion filtering.
pub fn is_excluded(company_name: &str, exclusions: &[&str]) -> bool {
    let name = company_name.to_lowercase();
    exclusions
        .iter()
        .any(|entry| name.contains(&entry.to_lowercase()))
}
