use super::flatten::FlatRow;
use crate::lead::Lead;

/// Columns of the flattened leads table, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadColumn {
    Score,
    Company,
    Region,
    Category,
    Contact,
    Designation,
    Email,
    Phone,
    Intel,
    Icebreaker,
    AiEmail,
    EmployeeCount,
    Funding,
    TechStack,
    CompanyLinkedIn,
    ContactLinkedIn,
}

pub const AI_EMAIL_HEADER: &str = "AI Composed Email";

const LEADING: [LeadColumn; 10] = [
    LeadColumn::Score,
    LeadColumn::Company,
    LeadColumn::Region,
    LeadColumn::Category,
    LeadColumn::Contact,
    LeadColumn::Designation,
    LeadColumn::Email,
    LeadColumn::Phone,
    LeadColumn::Intel,
    LeadColumn::Icebreaker,
];

const TRAILING: [LeadColumn; 5] = [
    LeadColumn::EmployeeCount,
    LeadColumn::Funding,
    LeadColumn::TechStack,
    LeadColumn::CompanyLinkedIn,
    LeadColumn::ContactLinkedIn,
];

impl LeadColumn {
    pub fn header(&self) -> &'static str {
        match self {
            LeadColumn::Score => "Lead Score",
            LeadColumn::Company => "Company Name",
            LeadColumn::Region => "Region",
            LeadColumn::Category => "Category",
            LeadColumn::Contact => "Contact Person",
            LeadColumn::Designation => "Designation",
            LeadColumn::Email => "Email",
            LeadColumn::Phone => "Phone",
            LeadColumn::Intel => "Intel",
            LeadColumn::Icebreaker => "Icebreaker",
            LeadColumn::AiEmail => AI_EMAIL_HEADER,
            LeadColumn::EmployeeCount => "Employee Count",
            LeadColumn::Funding => "Latest Funding",
            LeadColumn::TechStack => "Tech Stack",
            LeadColumn::CompanyLinkedIn => "Company LinkedIn",
            LeadColumn::ContactLinkedIn => "Contact LinkedIn",
        }
    }

    /// Plain-text value of this column for one row.
    pub fn text(&self, row: &FlatRow<'_>, region: &str) -> String {
        let lead = row.lead;
        match self {
            LeadColumn::Score => lead.lead_score.to_string(),
            LeadColumn::Company => lead.company_name.clone(),
            LeadColumn::Region => region.to_string(),
            LeadColumn::Category => lead.category.clone(),
            LeadColumn::Contact => row.contact.contact_name.clone(),
            LeadColumn::Designation => row.contact.designation.clone(),
            LeadColumn::Email => lead.email.clone(),
            LeadColumn::Phone => lead.phone.clone(),
            LeadColumn::Intel => lead.justification.clone(),
            LeadColumn::Icebreaker => lead.outreach_suggestion.clone(),
            LeadColumn::AiEmail => lead.composed_email().unwrap_or_default().to_string(),
            LeadColumn::EmployeeCount => lead.employee_count.clone(),
            LeadColumn::Funding => lead.latest_funding.clone(),
            LeadColumn::TechStack => lead.tech_stack.join(", "),
            LeadColumn::CompanyLinkedIn => lead.company_linked_in.clone(),
            LeadColumn::ContactLinkedIn => row.contact.contact_linked_in.clone(),
        }
    }
}

/// Whether any lead in the set carries a non-empty composed email.
///
/// Decides the "AI Composed Email" column for the whole table, never per row.
pub fn has_composed_email(leads: &[Lead]) -> bool {
    leads.iter().any(|lead| lead.composed_email().is_some())
}

/// Column list for a lead set.
pub fn lead_columns(leads: &[Lead]) -> Vec<LeadColumn> {
    let mut columns = LEADING.to_vec();
    if has_composed_email(leads) {
        columns.push(LeadColumn::AiEmail);
    }
    columns.extend(TRAILING);
    columns
}
