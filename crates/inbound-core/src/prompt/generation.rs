use super::sections::{
    OUTPUT_FORMAT, data_gathering_rules, example_object, exclusion_rule, search_methods,
};
use super::{PromptPair, category_phrase};
use crate::query::SearchQuery;

/// Builds the prompt pair for a lead search.
///
/// The task depends on the query shape:
/// - client name only: a deep-dive on that company
/// - client name + similar companies: the deep-dive plus up to 5 lookalikes
/// - no client name: open-ended search in the category
pub fn build_generation_prompt(query: &SearchQuery) -> PromptPair {
    let mut sections = vec![task_description(query)];

    if let Some(rule) = exclusion_rule(&query.exclusions()) {
        sections.push(rule);
    }
    sections.push(search_methods(&query.search_platforms));
    sections.push(data_gathering_rules(query.compose_email));
    sections.push(OUTPUT_FORMAT.to_string());
    sections.push(example_object(query.compose_email));

    PromptPair::with_task(sections.join("\n\n"))
}

fn task_description(query: &SearchQuery) -> String {
    let category = category_phrase(&query.category);
    let region = query.region.trim();
    let department = query.department.trim();

    match query.client() {
        Some(client) if query.include_similar_companies => format!(
            "Your primary task is a deep-dive investigation into the company \"{client}\"{category}, which is based in the \"{region}\" region. In addition to this, identify up to 5 other international companies that are similar to \"{client}\" in business model and category, also from the \"{region}\" region and showing strong potential for Indian market expansion. For all companies found (the primary one and the similar ones), find contacts in the \"{department}\" department."
        ),
        Some(client) => format!(
            "Your primary task is a deep-dive investigation into the company \"{client}\"{category}, which is based in the \"{region}\" region. Focus only on this company. Find contacts in the \"{department}\" department."
        ),
        None => format!(
            "Your task is to find international companies{category} from the \"{region}\" region that are showing strong potential for Indian market expansion. Find as many high-quality leads as you can. For each company found, find contacts in the \"{department}\" department."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::SYSTEM_INSTRUCTION;
    use crate::prompt::sections::platform_clause;
    use crate::query::SearchPlatform;

    fn query() -> SearchQuery {
        SearchQuery {
            client_name: "InnovateTech".into(),
            category: "Technology".into(),
            department: "Marketing".into(),
            region: "USA".into(),
            ..SearchQuery::default()
        }
    }

    #[test]
    fn system_instruction_is_fixed() {
        let a = build_generation_prompt(&query());
        let b = build_generation_prompt(&SearchQuery::default());
        assert_eq!(a.system_instruction, SYSTEM_INSTRUCTION);
        assert_eq!(a.system_instruction, b.system_instruction);
    }

    #[test]
    fn single_company_deep_dive() {
        let prompt = build_generation_prompt(&query());
        let task = &prompt.task_instruction;
        assert!(task.contains("deep-dive investigation into the company \"InnovateTech\""));
        assert!(task.contains("in the \"Technology\" category"));
        assert!(!task.contains("up to 5 other international companies"));
    }

    #[test]
    fn deep_dive_with_lookalikes() {
        let prompt = build_generation_prompt(&SearchQuery {
            include_similar_companies: true,
            ..query()
        });
        let task = &prompt.task_instruction;
        assert!(task.contains("deep-dive investigation into the company \"InnovateTech\""));
        assert!(task.contains("up to 5 other international companies that are similar to \"InnovateTech\""));
        assert!(task.contains("find contacts in the \"Marketing\" department"));
    }

    #[test]
    fn open_ended_category_search() {
        let prompt = build_generation_prompt(&SearchQuery {
            client_name: String::new(),
            include_similar_companies: true,
            ..query()
        });
        let task = &prompt.task_instruction;
        assert!(task.starts_with("Your task is to find international companies in the \"Technology\" category"));
        assert!(!task.contains("deep-dive investigation into the company"));
    }

    #[test]
    fn one_clause_per_selected_platform() {
        let prompt = build_generation_prompt(&SearchQuery {
            search_platforms: SearchPlatform::all(),
            ..query()
        });
        let task = &prompt.task_instruction;
        let clauses = SearchPlatform::all()
            .into_iter()
            .filter(|p| task.contains(platform_clause(*p)))
            .count();
        assert_eq!(clauses, 3);
        for platform in SearchPlatform::all() {
            assert_eq!(task.matches(platform_clause(platform)).count(), 1);
        }
    }

    #[test]
    fn unselected_platform_is_left_out() {
        let prompt = build_generation_prompt(&SearchQuery {
            search_platforms: [SearchPlatform::SocialMedia].into_iter().collect(),
            ..query()
        });
        let task = &prompt.task_instruction;
        assert!(task.contains(platform_clause(SearchPlatform::SocialMedia)));
        assert!(!task.contains(platform_clause(SearchPlatform::GeneralWeb)));
        assert!(!task.contains(platform_clause(SearchPlatform::LinkedIn)));
    }

    #[test]
    fn every_exclusion_appears_verbatim() {
        let prompt = build_generation_prompt(&SearchQuery {
            exclusion_list: "Competitor A, Old Prospect Inc,  Known Partner LLC".into(),
            ..query()
        });
        let task = &prompt.task_instruction;
        assert!(task.contains("IMPORTANT EXCLUSION RULE"));
        for entry in ["Competitor A", "Old Prospect Inc", "Known Partner LLC"] {
            assert!(task.contains(entry), "missing {entry}");
        }
    }

    #[test]
    fn no_exclusion_rule_without_entries() {
        let prompt = build_generation_prompt(&SearchQuery {
            exclusion_list: " , ".into(),
            ..query()
        });
        assert!(!prompt.task_instruction.contains("EXCLUSION RULE"));
    }

    #[test]
    fn composed_email_requested_only_when_enabled() {
        let without = build_generation_prompt(&query());
        assert!(!without.task_instruction.contains("composedEmail"));

        let with = build_generation_prompt(&SearchQuery {
            compose_email: true,
            ..query()
        });
        assert!(with.task_instruction.contains("composedEmail"));
    }

    #[test]
    fn always_demands_bare_json_array() {
        let prompt = build_generation_prompt(&query());
        assert!(prompt.task_instruction.contains("single, valid JSON array"));
        assert!(prompt.task_instruction.contains("must start with '[' and end with ']'"));
    }
}
