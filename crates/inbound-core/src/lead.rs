//! Lead records returned by the generative backend.
//!
//! Field names serialize to the camelCase JSON schema the backend is asked to
//! produce, so a `Lead` can be parsed from a response and written to the
//! session file unchanged.

use serde::{Deserialize, Serialize};

/// Value used when a contact's LinkedIn profile could not be verified.
pub const NOT_FOUND: &str = "Not found";

/// Value used for absent fields in exports.
pub const NOT_AVAILABLE: &str = "N/A";

/// Returns true when `url` can be rendered as a hyperlink.
pub fn is_linkable(url: &str) -> bool {
    !url.is_empty() && url != NOT_FOUND && url.starts_with("http")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub contact_linked_in: String,
}

impl Contact {
    /// Stand-in row for a lead without contacts.
    pub fn placeholder() -> Self {
        Self {
            contact_name: NOT_AVAILABLE.to_string(),
            designation: NOT_AVAILABLE.to_string(),
            contact_linked_in: NOT_FOUND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

impl NewsArticle {
    /// `(title, url)` when the article was actually found.
    ///
    /// The backend reports a missing article as `{"title": "N/A", "url": "N/A"}`.
    pub fn link(&self) -> Option<(&str, &str)> {
        let url = self.url.trim();
        if url.is_empty() || url == NOT_AVAILABLE {
            None
        } else {
            Some((self.title.as_str(), url))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstagramPost {
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub url: String,
}

/// One discovered company with enrichment, scoring and contacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub company_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub company_linked_in: String,
    #[serde(default)]
    pub justification: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    pub lead_score: i64,
    #[serde(default)]
    pub outreach_suggestion: String,
    #[serde(default)]
    pub employee_count: String,
    #[serde(default)]
    pub latest_funding: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub competitors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_news: Option<NewsArticle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_india_news: Option<NewsArticle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composed_email: Option<String>,
    #[serde(default)]
    pub latest_instagram_posts: Vec<InstagramPost>,
}

impl Lead {
    /// Non-empty AI-composed email, if the backend wrote one.
    pub fn composed_email(&self) -> Option<&str> {
        self.composed_email
            .as_deref()
            .filter(|email| !email.trim().is_empty())
    }

    /// Article links that were found, in `(latestNews, latestIndiaNews)` order.
    pub fn news_links(&self) -> (Option<(&str, &str)>, Option<(&str, &str)>) {
        (
            self.latest_news.as_ref().and_then(NewsArticle::link),
            self.latest_india_news.as_ref().and_then(NewsArticle::link),
        )
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn not_found_is_never_linkable() {
        assert!(!is_linkable(NOT_FOUND));
        assert!(!is_linkable(""));
        assert!(is_linkable("https://linkedin.com/in/x"));
    }

    #[test]
    fn news_sentinel_has_no_link() {
        let missing = NewsArticle {
            title: "N/A".into(),
            url: "N/A".into(),
        };
        assert_eq!(missing.link(), None);

        let found = NewsArticle {
            title: "Example Corp Raises $25M".into(),
            url: "https://example.com/news".into(),
        };
        assert_eq!(
            found.link(),
            Some(("Example Corp Raises $25M", "https://example.com/news"))
        );
    }

    #[test]
    fn blank_composed_email_counts_as_absent() {
        let mut lead = lead("Acme", 80, vec![]);
        lead.composed_email = Some("   ".into());
        assert_eq!(lead.composed_email(), None);
        lead.composed_email = Some("hi".into());
        assert_eq!(lead.composed_email(), Some("hi"));
    }

    #[test]
    fn serializes_schema_field_names() {
        let json = serde_json::to_value(lead("Acme", 80, vec![contact("Jane", NOT_FOUND)])).unwrap();
        for key in [
            "companyName",
            "companyLinkedIn",
            "leadScore",
            "outreachSuggestion",
            "employeeCount",
            "latestFunding",
            "techStack",
            "latestInstagramPosts",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["contacts"][0]["contactLinkedIn"], "Not found");
        assert!(json.get("composedEmail").is_none());
    }
}
