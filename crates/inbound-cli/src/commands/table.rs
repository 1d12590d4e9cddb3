//! Terminal rendering of the results view.

use colored::{ColoredString, Colorize};
use inbound_core::lead::{Lead, NOT_AVAILABLE};
use inbound_core::projection::{ScoreBand, ranked, rows_for};
use std::fmt::Write;

const NAME_WIDTH: usize = 32;
const CATEGORY_WIDTH: usize = 18;
const CONTACT_WIDTH: usize = 24;
const DESIGNATION_WIDTH: usize = 22;

/// One row per contact, leads ordered by score and numbered from 1.
///
/// A lead's number, score, name and category appear on its first row only;
/// a lead without contacts gets a single placeholder row. Lead numbers are
/// what `inbound lookalikes` expects.
pub fn render_ranked(leads: &[Lead]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:>3}  {:>5}  {:<NAME_WIDTH$}  {:<CATEGORY_WIDTH$}  {:<CONTACT_WIDTH$}  {:<DESIGNATION_WIDTH$}  {}",
            "#", "Score", "Company", "Category", "Contact", "Designation", "Contact LinkedIn"
        )
        .bold()
    );

    for (position, (_, lead)) in ranked(leads).into_iter().enumerate() {
        for (i, row) in rows_for(lead).into_iter().enumerate() {
            let contact = &row.contact;
            let (number, score, name, category) = if i == 0 {
                (
                    (position + 1).to_string(),
                    score_badge(lead.lead_score),
                    truncate(&lead.company_name, NAME_WIDTH),
                    truncate(&or_na(&lead.category), CATEGORY_WIDTH),
                )
            } else {
                (String::new(), "     ".normal(), String::new(), String::new())
            };
            let _ = writeln!(
                out,
                "{:>3}  {}  {:<NAME_WIDTH$}  {:<CATEGORY_WIDTH$}  {:<CONTACT_WIDTH$}  {:<DESIGNATION_WIDTH$}  {}",
                number,
                score,
                name,
                category,
                truncate(&or_na(&contact.contact_name), CONTACT_WIDTH),
                truncate(&or_na(&contact.designation), DESIGNATION_WIDTH),
                contact.contact_linked_in.trim(),
            );
        }
    }
    out
}

/// Deep-dive panel for one lead.
pub fn render_details(row: usize, lead: &Lead) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {}",
        format!("{row}.").bold(),
        lead.company_name.bold(),
        score_badge(lead.lead_score)
    );

    field(&mut out, "Category", &lead.category);
    field(&mut out, "LinkedIn", &lead.company_linked_in);
    field(&mut out, "Email", &lead.email);
    field(&mut out, "Phone", &lead.phone);
    field(&mut out, "Employees", &lead.employee_count);
    field(&mut out, "Funding", &lead.latest_funding);
    field(&mut out, "Tech stack", &lead.tech_stack.join(", "));
    field(&mut out, "Competitors", &lead.competitors.join(", "));
    field(&mut out, "Why", &lead.justification);
    field(&mut out, "Icebreaker", &lead.outreach_suggestion);

    let (news, india_news) = lead.news_links();
    field(&mut out, "Latest news", &news.map(link_text).unwrap_or_default());
    field(
        &mut out,
        "India news",
        &india_news.map(link_text).unwrap_or_default(),
    );

    if lead.contacts.is_empty() {
        field(&mut out, "Contacts", "");
    } else {
        let _ = writeln!(out, "   {}", "Contacts:".dimmed());
        for contact in &lead.contacts {
            let _ = writeln!(
                out,
                "     - {} ({}) {}",
                contact.contact_name,
                or_na(&contact.designation),
                contact.contact_linked_in.dimmed()
            );
        }
    }

    if !lead.latest_instagram_posts.is_empty() {
        let _ = writeln!(out, "   {}", "Instagram:".dimmed());
        for post in &lead.latest_instagram_posts {
            let _ = writeln!(out, "     - {} {}", or_na(&post.caption), post.url.dimmed());
        }
    }

    if let Some(email) = lead.composed_email() {
        let _ = writeln!(out, "   {}", "AI composed email:".dimmed());
        for line in email.lines() {
            let _ = writeln!(out, "     {line}");
        }
    }
    out
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "   {:<12} {}", format!("{label}:").dimmed(), or_na(value));
}

fn link_text((title, url): (&str, &str)) -> String {
    format!("{title} <{url}>")
}

fn score_badge(score: i64) -> ColoredString {
    let text = format!("{score:>5}");
    match ScoreBand::of(score) {
        ScoreBand::Strong => text.green().bold(),
        ScoreBand::Moderate => text.yellow().bold(),
        ScoreBand::Weak => text.red().bold(),
    }
}

fn or_na(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
