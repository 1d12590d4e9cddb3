//! Turns raw backend text into lead records.
//!
//! The backend is asked for a bare JSON array but frequently wraps it in
//! markdown fences or a sentence of prose. The parser takes the span between
//! the first `[` and the last `]`, checks the few fields every lead must carry,
//! and fills in defaults for everything else. Leads come back in the order the
//! backend returned them.

use crate::error::{InboundError, Result};
use crate::lead::Lead;
use serde_json::{Map, Value};

const MAX_CONTACTS: usize = 5;
const SEQUENCE_FIELDS: &[&str] = &["techStack", "competitors", "latestInstagramPosts"];
const TEXT_FIELDS: &[&str] = &[
    "category",
    "companyLinkedIn",
    "justification",
    "email",
    "phone",
    "outreachSuggestion",
    "employeeCount",
    "latestFunding",
];
const OPTIONAL_FIELDS: &[&str] = &["latestNews", "latestIndiaNews", "composedEmail"];

/// Parses a backend reply into leads.
pub fn parse_leads(raw: &str) -> Result<Vec<Lead>> {
    let json = extract_array(raw)
        .ok_or_else(|| InboundError::malformed("no JSON array found in the response", raw))?;

    let value: Value = serde_json::from_str(json)
        .map_err(|e| InboundError::malformed(format!("invalid JSON: {e}"), raw))?;

    let Value::Array(items) = value else {
        return Err(InboundError::malformed("top-level value is not an array", raw));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            parse_lead(index, item).map_err(|reason| InboundError::malformed(reason, raw))
        })
        .collect()
}

/// The slice from the first `[` to the last `]`, inclusive.
fn extract_array(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    (end > start).then(|| &raw[start..=end])
}

fn parse_lead(index: usize, item: Value) -> std::result::Result<Lead, String> {
    let Value::Object(mut fields) = item else {
        return Err(format!("lead #{index} is not an object"));
    };

    validate_required(index, &fields)?;
    normalize(&mut fields);

    let lead: Lead = serde_json::from_value(Value::Object(fields))
        .map_err(|e| format!("lead #{index} does not match the schema: {e}"))?;

    if !(1..=100).contains(&lead.lead_score) {
        tracing::warn!(
            "[ResponseParser] Lead '{}' has out-of-range score {}",
            lead.company_name,
            lead.lead_score
        );
    }
    if lead.contacts.len() > MAX_CONTACTS {
        tracing::warn!(
            "[ResponseParser] Lead '{}' has {} contacts (expected at most {})",
            lead.company_name,
            lead.contacts.len(),
            MAX_CONTACTS
        );
    }

    Ok(lead)
}

fn validate_required(index: usize, fields: &Map<String, Value>) -> std::result::Result<(), String> {
    match fields.get("companyName") {
        Some(Value::String(_)) => {}
        _ => return Err(format!("lead #{index} has no companyName")),
    }
    match fields.get("leadScore") {
        Some(Value::Number(_)) => {}
        _ => return Err(format!("lead #{index} has no numeric leadScore")),
    }
    match fields.get("contacts") {
        Some(Value::Array(_)) => Ok(()),
        _ => Err(format!("lead #{index} has no contacts array")),
    }
}

/// Fills defaults so the record deserializes into [`Lead`].
fn normalize(fields: &mut Map<String, Value>) {
    for key in SEQUENCE_FIELDS {
        match fields.get(*key) {
            Some(Value::Array(_)) => {}
            _ => {
                fields.insert((*key).to_string(), Value::Array(Vec::new()));
            }
        }
    }

    fill_text(fields, TEXT_FIELDS);

    if let Some(Value::Array(contacts)) = fields.get_mut("contacts") {
        for contact in contacts.iter_mut() {
            if let Value::Object(contact) = contact {
                fill_text(contact, &["contactName", "designation", "contactLinkedIn"]);
            }
        }
    }
    if let Some(Value::Array(posts)) = fields.get_mut("latestInstagramPosts") {
        for post in posts.iter_mut() {
            if let Value::Object(post) = post {
                fill_text(post, &["caption", "url"]);
            }
        }
    }
    for key in ["latestNews", "latestIndiaNews"] {
        if let Some(Value::Object(article)) = fields.get_mut(key) {
            fill_text(article, &["title", "url"]);
        }
    }

    for key in OPTIONAL_FIELDS {
        if matches!(fields.get(*key), Some(Value::Null)) {
            fields.remove(*key);
        }
    }

    if let Some(score) = fields.get("leadScore").and_then(Value::as_f64) {
        fields.insert("leadScore".to_string(), Value::from(score.round() as i64));
    }

    // Stringify scalar list entries, e.g. a tech stack of numbers.
    for key in ["techStack", "competitors"] {
        if let Some(Value::Array(entries)) = fields.get_mut(key) {
            for entry in entries.iter_mut() {
                if !entry.is_string() {
                    let text = match &*entry {
                        Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    *entry = Value::String(text);
                }
            }
        }
    }
}

/// Replaces missing, null or non-string values of `keys` with strings.
fn fill_text(object: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        let text = match object.get(*key) {
            Some(Value::String(_)) => continue,
            None | Some(Value::Null) => String::new(),
            Some(other) => other.to_string(),
        };
        object.insert((*key).to_string(), Value::String(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::fixtures::{contact, lead};
    use crate::lead::{InstagramPost, NewsArticle};

    #[test]
    fn not_json_is_malformed() {
        let err = parse_leads("not json").unwrap_err();
        assert!(err.is_malformed_response());
        assert_eq!(err.raw_response(), Some("not json"));
    }

    #[test]
    fn non_array_is_malformed() {
        let err = parse_leads(r#"{"companyName": "Acme"}"#).unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[test]
    fn broken_json_between_brackets_is_malformed() {
        let err = parse_leads("[ {\"companyName\": ] ").unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[test]
    fn strips_markdown_fences_and_prose() {
        let raw = "Here are your leads:\n```json\n[{\"companyName\": \"Acme\", \"leadScore\": 72, \"contacts\": []}]\n```\nGood luck!";
        let leads = parse_leads(raw).unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].company_name, "Acme");
        assert_eq!(leads[0].lead_score, 72);
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_leads("[]").unwrap().is_empty());
    }

    #[test]
    fn missing_optional_sequences_become_empty() {
        let raw = r#"[{"companyName": "Acme", "leadScore": 60, "contacts": [], "techStack": null}]"#;
        let lead = &parse_leads(raw).unwrap()[0];
        assert!(lead.tech_stack.is_empty());
        assert!(lead.competitors.is_empty());
        assert!(lead.latest_instagram_posts.is_empty());
        assert_eq!(lead.email, "");
        assert_eq!(lead.composed_email, None);
        assert_eq!(lead.latest_news, None);
    }

    #[test]
    fn rejects_missing_required_fields() {
        for raw in [
            r#"[{"leadScore": 60, "contacts": []}]"#,
            r#"[{"companyName": "Acme", "contacts": []}]"#,
            r#"[{"companyName": "Acme", "leadScore": "high", "contacts": []}]"#,
            r#"[{"companyName": "Acme", "leadScore": 60}]"#,
            r#"["Acme"]"#,
        ] {
            let err = parse_leads(raw).unwrap_err();
            assert!(err.is_malformed_response(), "accepted {raw}");
        }
    }

    #[test]
    fn tolerates_composed_email_either_way() {
        let raw = r#"[
            {"companyName": "A", "leadScore": 50, "contacts": [], "composedEmail": "Hello"},
            {"companyName": "B", "leadScore": 40, "contacts": [], "composedEmail": null}
        ]"#;
        let leads = parse_leads(raw).unwrap();
        assert_eq!(leads[0].composed_email.as_deref(), Some("Hello"));
        assert_eq!(leads[1].composed_email, None);
    }

    #[test]
    fn null_nested_strings_become_empty() {
        let raw = r#"[{"companyName": "A", "leadScore": 50,
            "contacts": [{"contactName": "Jane", "designation": null}],
            "latestNews": {"title": "Launch", "url": null}}]"#;
        let lead = &parse_leads(raw).unwrap()[0];
        assert_eq!(lead.contacts[0].designation, "");
        assert_eq!(lead.contacts[0].contact_linked_in, "");
        assert_eq!(lead.latest_news.as_ref().unwrap().link(), None);
    }

    #[test]
    fn scalar_list_entries_become_strings() {
        let raw = r#"[{"companyName": "A", "leadScore": 50, "contacts": [],
            "techStack": ["Rust", 3, null, true], "competitors": [42]}]"#;
        let lead = &parse_leads(raw).unwrap()[0];
        assert_eq!(lead.tech_stack, vec!["Rust", "3", "", "true"]);
        assert_eq!(lead.competitors, vec!["42"]);
    }

    #[test]
    fn out_of_range_score_passes_through() {
        let raw = r#"[{"companyName": "A", "leadScore": 140, "contacts": []}]"#;
        assert_eq!(parse_leads(raw).unwrap()[0].lead_score, 140);
    }

    #[test]
    fn fractional_score_is_rounded() {
        let raw = r#"[{"companyName": "A", "leadScore": 87.6, "contacts": []}]"#;
        assert_eq!(parse_leads(raw).unwrap()[0].lead_score, 88);
    }

    #[test]
    fn preserves_backend_order() {
        let raw = r#"[
            {"companyName": "Low", "leadScore": 10, "contacts": []},
            {"companyName": "High", "leadScore": 95, "contacts": []}
        ]"#;
        let names: Vec<_> = parse_leads(raw)
            .unwrap()
            .into_iter()
            .map(|l| l.company_name)
            .collect();
        assert_eq!(names, vec!["Low", "High"]);
    }

    #[test]
    fn round_trip_preserves_leads() {
        let mut first = lead("Acme", 91, vec![
            contact("Jane Doe", "https://www.linkedin.com/in/janedoe"),
            contact("John Smith", "Not found"),
        ]);
        first.composed_email = Some("Subject: Hi\n\nHello Jane".into());
        first.latest_news = Some(NewsArticle {
            title: "Acme raises $25M".into(),
            url: "https://example.com/acme".into(),
        });
        first.latest_india_news = Some(NewsArticle {
            title: "N/A".into(),
            url: "N/A".into(),
        });
        first.latest_instagram_posts = vec![InstagramPost {
            caption: "Launch day [new] \"product\"".into(),
            url: "https://www.instagram.com/p/abc".into(),
        }];
        let second = lead("Globex", 44, vec![]);
        let leads = vec![first, second];

        let json = serde_json::to_string_pretty(&leads).unwrap();
        assert_eq!(parse_leads(&json).unwrap(), leads);
    }
}
