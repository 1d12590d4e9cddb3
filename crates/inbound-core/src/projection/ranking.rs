use crate::lead::Lead;
use strum::Display;

/// Colour band of a lead score in the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn of(score: i64) -> Self {
        if score > 75 {
            ScoreBand::Strong
        } else if score > 50 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }
}

/// Leads ordered by descending score, each paired with its stored index.
///
/// Equal scores keep their stored order. The stored list is not touched.
pub fn ranked(leads: &[Lead]) -> Vec<(usize, &Lead)> {
    let mut ranked: Vec<_> = leads.iter().enumerate().collect();
    ranked.sort_by(|(_, a), (_, b)| b.lead_score.cmp(&a.lead_score));
    ranked
}
