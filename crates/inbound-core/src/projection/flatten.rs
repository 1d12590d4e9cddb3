use crate::lead::{Contact, Lead};
use std::borrow::Cow;

/// One display/export row: a lead paired with one of its contacts.
#[derive(Debug, Clone)]
pub struct FlatRow<'a> {
    pub lead: &'a Lead,
    pub contact: Cow<'a, Contact>,
}

/// Expands every lead into one row per contact.
///
/// A lead without contacts still yields exactly one row, carrying
/// [`Contact::placeholder`].
pub fn flatten(leads: &[Lead]) -> Vec<FlatRow<'_>> {
    leads.iter().flat_map(rows_for).collect()
}

/// Rows for a single lead.
pub fn rows_for(lead: &Lead) -> Vec<FlatRow<'_>> {
    if lead.contacts.is_empty() {
        return vec![FlatRow {
            lead,
            contact: Cow::Owned(Contact::placeholder()),
        }];
    }
    lead.contacts
        .iter()
        .map(|contact| FlatRow {
            lead,
            contact: Cow::Borrowed(contact),
        })
        .collect()
}
