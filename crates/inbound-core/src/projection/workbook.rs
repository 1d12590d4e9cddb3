//! Three-sheet workbook model for spreadsheet export.
//!
//! The model is format-agnostic; a [`WorkbookWriter`] turns it into bytes.

use super::columns::{LeadColumn, lead_columns};
use super::flatten::flatten;
use crate::error::Result;
use crate::lead::{InstagramPost, Lead, NOT_AVAILABLE, NewsArticle, is_linkable};

pub const LEADS_SHEET: &str = "Leads";
pub const NEWS_SHEET: &str = "Latest News";
pub const INSTAGRAM_SHEET: &str = "Instagram Posts";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// A hyperlink cell showing `label`.
    Link { label: String, url: String },
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Display text of the cell.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Link { label, .. } => label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    /// Column widths in characters. Empty means writer defaults.
    pub widths: Vec<f64>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    fn new(name: &str, columns: &[&str], widths: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            widths: widths.to_vec(),
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}

/// Serializes a [`Workbook`] into a file format.
pub trait WorkbookWriter {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    fn write(&self, workbook: &Workbook) -> Result<Vec<u8>>;
}

/// Builds the Leads, Latest News and Instagram Posts sheets.
pub fn build_workbook(leads: &[Lead], region: &str) -> Workbook {
    Workbook {
        sheets: vec![
            leads_sheet(leads, region),
            news_sheet(leads),
            instagram_sheet(leads),
        ],
    }
}

fn leads_sheet(leads: &[Lead], region: &str) -> Sheet {
    let columns = lead_columns(leads);
    let headers: Vec<&str> = columns.iter().map(LeadColumn::header).collect();
    let mut sheet = Sheet::new(LEADS_SHEET, &headers, &[]);

    for row in flatten(leads) {
        let cells = columns
            .iter()
            .map(|column| {
                let text = column.text(&row, region);
                match column {
                    LeadColumn::Score => Cell::Number(row.lead.lead_score as f64),
                    LeadColumn::CompanyLinkedIn | LeadColumn::ContactLinkedIn
                        if is_linkable(&text) =>
                    {
                        Cell::Link {
                            label: text.clone(),
                            url: text,
                        }
                    }
                    _ => Cell::Text(text),
                }
            })
            .collect();
        sheet.rows.push(cells);
    }
    sheet
}

fn news_cell(article: Option<&NewsArticle>) -> Cell {
    match article {
        None => Cell::text(NOT_AVAILABLE),
        Some(article) => match article.link() {
            Some((title, url)) => Cell::Link {
                label: title.to_string(),
                url: url.to_string(),
            },
            None => Cell::text(NOT_AVAILABLE),
        },
    }
}

fn news_sheet(leads: &[Lead]) -> Sheet {
    let mut sheet = Sheet::new(
        NEWS_SHEET,
        &[
            "Lead Score",
            "Company Name",
            "Latest News about the Company",
            "Latest News Related to India Market",
        ],
        &[10.0, 30.0, 60.0, 60.0],
    );
    for lead in leads {
        sheet.rows.push(vec![
            Cell::Number(lead.lead_score as f64),
            Cell::text(lead.company_name.clone()),
            news_cell(lead.latest_news.as_ref()),
            news_cell(lead.latest_india_news.as_ref()),
        ]);
    }
    sheet
}

/// Link labelled with the caption, or plain text when the url is unusable.
fn post_cell(post: &InstagramPost) -> Cell {
    let url = post.url.trim();
    if !is_linkable(url) {
        return Cell::text(if url.is_empty() { NOT_AVAILABLE } else { url });
    }
    let label = if post.caption.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        post.caption.clone()
    };
    Cell::Link {
        label,
        url: url.to_string(),
    }
}

fn instagram_sheet(leads: &[Lead]) -> Sheet {
    let mut sheet = Sheet::new(
        INSTAGRAM_SHEET,
        &["Company Name", "Post Caption", "Post URL"],
        &[30.0, 60.0, 60.0],
    );
    for lead in leads {
        let company = Cell::text(lead.company_name.clone());
        if lead.latest_instagram_posts.is_empty() {
            sheet.rows.push(vec![
                company,
                Cell::text(NOT_AVAILABLE),
                Cell::text(NOT_AVAILABLE),
            ]);
            continue;
        }
        for post in &lead.latest_instagram_posts {
            sheet.rows.push(vec![
                company.clone(),
                Cell::text(post.caption.clone()),
                post_cell(post),
            ]);
        }
    }
    sheet
}
