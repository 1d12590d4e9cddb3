pub mod export;
pub mod json_session_repository;
pub mod paths;
pub mod spreadsheet_ml;
pub mod storage;

pub use export::{ExportFormat, ExportOutcome, ExportService};
pub use json_session_repository::JsonSessionRepository;
pub use paths::{InboundPaths, PathError};
pub use spreadsheet_ml::SpreadsheetMlWriter;
pub use storage::{ConfigStorage, SecretStorage};
