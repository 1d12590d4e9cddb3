//! Writes lead exports to disk.

use crate::spreadsheet_ml::SpreadsheetMlWriter;
use inbound_core::{InboundError, Result};
use inbound_core::lead::Lead;
use inbound_core::projection::{
    WorkbookWriter, build_workbook, clipboard_payload, flatten, to_csv,
};
use std::fs;
use std::path::{Path, PathBuf};

pub const CSV_FILE_STEM: &str = "leads";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Workbook,
    Clipboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, rows: usize },
    /// Text meant for the clipboard; the caller decides where it goes.
    Clipboard(String),
}

/// Renders exports and writes file formats into a directory.
pub struct ExportService<W = SpreadsheetMlWriter> {
    export_dir: PathBuf,
    workbook_writer: W,
}

impl ExportService {
    pub fn new(export_dir: PathBuf) -> Self {
        Self::with_writer(export_dir, SpreadsheetMlWriter)
    }
}

impl<W: WorkbookWriter> ExportService<W> {
    pub fn with_writer(export_dir: PathBuf, workbook_writer: W) -> Self {
        Self {
            export_dir,
            workbook_writer,
        }
    }

    /// Default file path for a format, inside the export directory.
    pub fn default_path(&self, format: ExportFormat) -> Option<PathBuf> {
        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Workbook => self.workbook_writer.extension(),
            ExportFormat::Clipboard => return None,
        };
        Some(self.export_dir.join(format!("{CSV_FILE_STEM}.{extension}")))
    }

    /// Exports `leads`. `output` overrides the default file path.
    pub fn export(
        &self,
        leads: &[Lead],
        region: &str,
        format: ExportFormat,
        output: Option<&Path>,
    ) -> Result<ExportOutcome> {
        let bytes = match format {
            ExportFormat::Clipboard => {
                return Ok(ExportOutcome::Clipboard(clipboard_payload(leads, region)));
            }
            ExportFormat::Csv => to_csv(leads, region).into_bytes(),
            ExportFormat::Workbook => self.workbook_writer.write(&build_workbook(leads, region))?,
        };

        let path = match output {
            Some(path) => path.to_path_buf(),
            None => self
                .default_path(format)
                .ok_or_else(|| InboundError::config("no output path for this format"))?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;

        tracing::info!("[ExportService] Wrote {} leads to {}", leads.len(), path.display());
        Ok(ExportOutcome::Written {
            path,
            rows: flatten(leads).len(),
        })
    }
}
