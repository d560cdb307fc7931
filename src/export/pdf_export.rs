// src/export/pdf_export.rs

use crate::core::InvoiceData;
use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::export::pdf::{InvoicePdf, Letterhead};
use crate::ui::messages::info;
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Renders `data` with the default letterhead.
pub fn generate_pdf(data: &InvoiceData) -> AppResult<Vec<u8>> {
    InvoicePdf::render(data, &Letterhead::default()).map(|pdf| pdf.bytes)
}

/// `invoice-<client-name>-<number>.pdf`, client name lowercased with
/// whitespace runs collapsed to '-'.
pub fn suggested_filename(data: &InvoiceData) -> String {
    let client = WHITESPACE
        .replace_all(&data.client_name.to_lowercase(), "-")
        .into_owned();
    format!("invoice-{}-{}.pdf", client, data.invoice_number)
}

/// Destination for a finished document.
pub trait DownloadSink {
    fn deliver(&mut self, bytes: &[u8], filename: &str) -> AppResult<PathBuf>;
}

/// Writes documents into a directory, creating it when needed.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for FileSink {
    fn deliver(&mut self, bytes: &[u8], filename: &str) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Render and hand the document to `sink`.
pub fn export_invoice_pdf(
    data: &InvoiceData,
    letterhead: &Letterhead,
    sink: &mut dyn DownloadSink,
) -> AppResult<PathBuf> {
    info(format!("Rendering invoice #{}", data.invoice_number));

    let pdf = InvoicePdf::render(data, letterhead)?;
    let path = sink.deliver(&pdf.bytes, &suggested_filename(data))?;

    notify_export_success("PDF", &path);
    Ok(path)
}
