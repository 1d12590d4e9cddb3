//! Read-only views over a lead list: flattened rows, CSV, workbook and ranking.

mod columns;
mod csv;
mod flatten;
mod ranking;
mod workbook;

pub use columns::{AI_EMAIL_HEADER, LeadColumn, has_composed_email, lead_columns};
pub use csv::{clipboard_payload, to_csv};
pub use flatten::{FlatRow, flatten, rows_for};
pub use ranking::{ScoreBand, ranked};
pub use workbook::{
    Cell, INSTAGRAM_SHEET, LEADS_SHEET, NEWS_SHEET, Sheet, Workbook, WorkbookWriter,
    build_workbook,
};
