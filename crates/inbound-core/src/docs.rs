//! User guide and prompt architecture, rendered as Markdown.

use crate::prompt::sections::{
    OUTPUT_FORMAT, data_gathering_rules, example_object, search_methods,
};
use crate::prompt::{SYSTEM_INSTRUCTION, build_generation_prompt};
use crate::query::{CATEGORY_OPTIONS, DEPARTMENT_OPTIONS, REGION_OPTIONS, SearchPlatform, SearchQuery};
use std::fmt::Write;

const TITLE: &str = "# Inbound: AI Lead Generation Assistant";

const INTRODUCTION: &str = "\
Inbound finds international companies that show strong intent to expand into \
the Indian market. It asks Gemini (with Google Search grounding) to research \
companies, identify decision-makers in a chosen department, score each lead \
from 1 to 100 and suggest a personalized opener. Results are kept between runs \
and can be exported to CSV, a spreadsheet workbook or the clipboard.";

const USAGE: &str = "\
## Usage

1. `inbound init` writes `secret.json` and `config.toml` into the config \
directory. Put your Gemini API key into `secret.json`, or export `GEMINI_API_KEY`.
2. `inbound generate --client \"InnovateTech\" --similar` runs a deep-dive on one \
company plus up to 5 lookalikes. Leave out `--client` to search a whole \
`--category`. Flags you omit are taken from the last search.
3. `inbound show` lists the stored leads ranked by score. `--details` adds the \
deep-dive panel: funding, tech stack, competitors, news and Instagram posts.
4. `inbound lookalikes <N>` searches for companies similar to row N and \
appends them to the list.
5. `inbound export --format csv|xlsx|clipboard` writes `leads.csv`, the \
three-sheet `leads.xml` workbook, or prints spreadsheet-ready text.
6. `inbound clear` forgets the stored session.";

const FIELDS: &str = "\
## Search fields

| Flag | Meaning |
|------|---------|
| `--client` | Company for a deep-dive (optional) |
| `--category` | Industry to search when no client is given |
| `--department` | Department to find contacts in |
| `--region` | Region the companies are based in |
| `--platform` | Sources to search; repeat for several |
| `--similar` | With `--client`, also find up to 5 similar companies |
| `--compose-email` | Ask for a full outreach email per lead |
| `--exclude` | Comma-separated companies to leave out |

A search needs a client name or a category, and at least one platform.";

const EXPORTS: &str = "\
## Exports

- **CSV**: one line per contact. Leads without contacts get a single `N/A` row. \
The `AI Composed Email` column appears only when some lead has an email.
- **Workbook** (`leads.xml`, SpreadsheetML): a `Leads` sheet with clickable \
LinkedIn links, a `Latest News` sheet and an `Instagram Posts` sheet.
- **Clipboard**: the CSV text on stdout, ready to paste into a spreadsheet.";

/// Query used for the sample prompt in the documentation.
pub fn example_query() -> SearchQuery {
    SearchQuery {
        client_name: "InnovateTech".to_string(),
        category: "Technology".to_string(),
        department: "Marketing".to_string(),
        region: "USA".to_string(),
        search_platforms: SearchPlatform::all(),
        include_similar_companies: true,
        compose_email: false,
        exclusion_list: "Competitor A, Old Prospect Inc".to_string(),
    }
}

/// Renders the full documentation.
pub fn render_documentation() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}\n\n{INTRODUCTION}\n\n{USAGE}\n\n{FIELDS}\n");
    let _ = writeln!(out, "{}\n", option_lists());
    let _ = writeln!(out, "{EXPORTS}\n");
    out.push_str(&prompt_architecture());
    out
}

fn option_lists() -> String {
    let platforms = SearchPlatform::all()
        .into_iter()
        .map(|p| format!("`{p}` ({})", p.label()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Suggested values (any text is accepted):\n\n- Regions: {}\n- Departments: {}\n- Categories: {}\n- Platforms: {platforms}",
        REGION_OPTIONS.join(", "),
        DEPARTMENT_OPTIONS.join(", "),
        CATEGORY_OPTIONS.join(", "),
    )
}

fn fenced(text: &str) -> String {
    format!("```\n{text}\n```")
}

fn prompt_architecture() -> String {
    let query = example_query();
    let prompt = build_generation_prompt(&query);

    let sections = [
        "## Prompt architecture".to_string(),
        "Every request carries a fixed system instruction and a task instruction built from the search fields.".to_string(),
        "### System instruction".to_string(),
        fenced(SYSTEM_INSTRUCTION),
        "### Search methods".to_string(),
        "One line per selected platform.".to_string(),
        fenced(&search_methods(&SearchPlatform::all())),
        "### Data gathering rules".to_string(),
        fenced(&data_gathering_rules(true)),
        "### Output format".to_string(),
        fenced(&format!("{OUTPUT_FORMAT}\n\n{}", example_object(true))),
        "### Sample task instruction".to_string(),
        format!(
            "Built for client `{}`, category `{}`, region `{}`, department `{}`, all platforms, similar companies on, excluding `{}`.",
            query.client_name, query.category, query.region, query.department, query.exclusion_list
        ),
        fenced(&prompt.task_instruction),
    ];
    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_system_instruction_and_sample_prompt() {
        let doc = render_documentation();
        assert!(doc.starts_with(TITLE));
        assert!(doc.contains(SYSTEM_INSTRUCTION));
        assert!(doc.contains("deep-dive investigation into the company \"InnovateTech\""));
        assert!(doc.contains("Competitor A, Old Prospect Inc."));
    }

    #[test]
    fn lists_every_platform() {
        let doc = render_documentation();
        for platform in SearchPlatform::all() {
            assert!(doc.contains(platform.label()));
        }
    }

    #[test]
    fn code_fences_are_balanced() {
        let doc = render_documentation();
        assert_eq!(doc.matches("```").count() % 2, 0);
    }
}
