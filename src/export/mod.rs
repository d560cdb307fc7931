// src/export/mod.rs

mod json_csv;
pub mod logic;
mod model;
pub mod pdf;
pub mod pdf_export;

pub use logic::ExportLogic;
pub use model::{TimesheetExport, timesheets_to_export};
pub use pdf::{CONTINUATION_MARKER, InvoicePdf, Letterhead};
pub use pdf_export::{DownloadSink, FileSink, export_invoice_pdf, generate_pdf, suggested_filename};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}
