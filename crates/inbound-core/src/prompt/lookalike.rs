use super::sections::{
    OUTPUT_FORMAT, data_gathering_rules, example_object, exclusion_rule, search_methods,
};
use super::{PromptPair, category_phrase};
use crate::lead::Lead;
use crate::query::{SearchPlatform, parse_exclusions};
use std::collections::BTreeSet;

/// Inputs of a lookalike search: one seed lead plus the current filters.
#[derive(Debug, Clone, Copy)]
pub struct LookalikeRequest<'a> {
    pub seed: &'a Lead,
    pub region: &'a str,
    pub department: &'a str,
    pub exclusion_list: &'a str,
}

/// Builds the prompt pair that asks for companies similar to a seed lead.
///
/// The seed company itself is always excluded alongside the user's list.
pub fn build_lookalike_prompt(request: LookalikeRequest<'_>) -> PromptPair {
    let seed = request.seed;
    let mut excluded = vec![seed.company_name.trim()];
    excluded.extend(
        parse_exclusions(request.exclusion_list)
            .into_iter()
            .filter(|entry| *entry != seed.company_name.trim()),
    );

    let category = category_phrase(&seed.category);
    let region = request.region.trim();
    let department = request.department.trim();
    let company = seed.company_name.trim();

    let mut task = format!(
        "Your task is to find up to 5 international companies that are similar to \"{company}\"{category}. Similarity means a comparable business model, product category and target customers. The companies must be based in the \"{region}\" region and show strong potential for Indian market expansion. Do NOT include \"{company}\" itself. For each company found, find contacts in the \"{department}\" department."
    );
    if !seed.justification.trim().is_empty() {
        task.push_str(&format!(
            "\n\nFor reference, \"{company}\" was identified as a lead because: {}",
            seed.justification.trim()
        ));
    }

    let platforms: BTreeSet<SearchPlatform> =
        [SearchPlatform::GeneralWeb, SearchPlatform::LinkedIn]
            .into_iter()
            .collect();

    let mut sections = vec![task];
    if let Some(rule) = exclusion_rule(&excluded) {
        sections.push(rule);
    }
    sections.push(search_methods(&platforms));
    sections.push(data_gathering_rules(false));
    sections.push(OUTPUT_FORMAT.to_string());
    sections.push(example_object(false));

    PromptPair::with_task(sections.join("\n\n"))
}
