use super::columns::lead_columns;
use super::flatten::flatten;
use crate::lead::Lead;

/// Serializes leads as CSV, one line per flattened row.
///
/// Every field is quoted with embedded quotes doubled and line breaks folded
/// into single spaces, so each record stays on one line.
pub fn to_csv(leads: &[Lead], region: &str) -> String {
    let columns = lead_columns(leads);

    let header = columns
        .iter()
        .map(|column| column.header())
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = vec![header];
    for row in flatten(leads) {
        let line = columns
            .iter()
            .map(|column| quote(&column.text(&row, region)))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    lines.join("\n")
}

/// Text placed on the clipboard for pasting into a spreadsheet.
pub fn clipboard_payload(leads: &[Lead], region: &str) -> String {
    to_csv(leads, region)
}

fn quote(value: &str) -> String {
    let single_line = value.replace("\r\n", " ").replace(['\n', '\r'], " ");
    format!("\"{}\"", single_line.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::fixtures::{contact, lead};
    use crate::projection::columns::AI_EMAIL_HEADER;

    fn header(csv: &str) -> Vec<&str> {
        csv.lines().next().unwrap().split(',').collect()
    }

    #[test]
    fn fixed_column_order() {
        let csv = to_csv(&[lead("Acme", 80, vec![])], "USA");
        assert_eq!(
            csv.lines().next().unwrap(),
            "Lead Score,Company Name,Region,Category,Contact Person,Designation,Email,Phone,Intel,Icebreaker,Employee Count,Latest Funding,Tech Stack,Company LinkedIn,Contact LinkedIn"
        );
    }

    #[test]
    fn ai_email_column_is_set_wide() {
        let plain = vec![lead("A", 80, vec![]), lead("B", 60, vec![])];
        let mut with_email = plain.clone();
        with_email[1].composed_email = Some("hi".into());

        let plain_csv = to_csv(&plain, "Global");
        let email_csv = to_csv(&with_email, "Global");

        assert!(!header(&plain_csv).contains(&AI_EMAIL_HEADER));
        assert!(header(&email_csv).contains(&AI_EMAIL_HEADER));
        assert_eq!(header(&email_csv).len(), header(&plain_csv).len() + 1);

        let rows: Vec<_> = email_csv.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        // Column 11 is the AI email: empty for A, populated for B.
        assert_eq!(rows[0].split("\",\"").nth(10), Some(""));
        assert_eq!(rows[1].split("\",\"").nth(10), Some("hi"));
    }

    #[test]
    fn whitespace_email_exports_empty() {
        let mut leads = vec![lead("A", 80, vec![]), lead("B", 60, vec![])];
        leads[0].composed_email = Some("   ".into());
        leads[1].composed_email = Some("hi".into());

        let csv = to_csv(&leads, "Global");
        let rows: Vec<_> = csv.lines().skip(1).collect();
        assert_eq!(rows[0].split("\",\"").nth(10), Some(""));
    }

    #[test]
    fn blank_composed_email_does_not_add_column() {
        let mut leads = vec![lead("A", 80, vec![])];
        leads[0].composed_email = Some(String::new());
        assert!(!to_csv(&leads, "Global").contains(AI_EMAIL_HEADER));
    }

    #[test]
    fn quotes_escapes_and_folds_newlines() {
        let mut acme = lead("Acme \"The Best\"", 80, vec![]);
        acme.justification = "Line one\nLine two\r\nLine three".into();
        let csv = to_csv(&[acme], "UK/Europe");
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("\"80\",\"Acme \"\"The Best\"\"\",\"UK/Europe\""));
        assert!(row.contains("\"Line one Line two Line three\""));
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn tech_stack_is_comma_joined() {
        let csv = to_csv(&[lead("Acme", 80, vec![])], "USA");
        assert!(csv.contains("\"React, Node.js\""));
    }

    #[test]
    fn one_line_per_contact() {
        let leads = vec![
            lead("A", 80, vec![contact("a1", "Not found"), contact("a2", "https://linkedin.com/in/a2")]),
            lead("B", 60, vec![]),
        ];
        let csv = to_csv(&leads, "USA");
        assert_eq!(csv.lines().count(), 1 + 3);
        let last = csv.lines().last().unwrap();
        assert!(last.contains("\"N/A\",\"N/A\""));
        assert!(last.ends_with("\"Not found\""));
    }

    #[test]
    fn clipboard_matches_csv() {
        let leads = vec![lead("A", 80, vec![contact("a1", "Not found")])];
        assert_eq!(clipboard_payload(&leads, "USA"), to_csv(&leads, "USA"));
    }
}
