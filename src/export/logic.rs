// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::timesheets_to_export;
use crate::models::Timesheet;
use crate::store::Snapshot;
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// High-level export of a timesheet view.
pub struct ExportLogic;

impl ExportLogic {
    /// Writes `timesheets` (already filtered and sorted) to `file`.
    ///
    /// - `format`: csv | json
    /// - `file`: absolute output path
    /// - `force`: overwrite without asking
    pub fn export(
        snap: &Snapshot,
        timesheets: &[Timesheet],
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        if timesheets.is_empty() {
            warning("No timesheets found for the selected week.");
            return Ok(());
        }

        if path.exists() && !force {
            Self::confirm_overwrite(path, timesheets.len(), &mut io::stdin().lock())?;
        }

        let rows = timesheets_to_export(snap, timesheets);
        log::debug!("exporting {} rows as {}", rows.len(), format.as_str());

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(())
    }

    /// Asks whether an existing export may be replaced; anything but y/yes
    /// keeps the old file.
    fn confirm_overwrite(path: &Path, rows: usize, answer: &mut impl BufRead) -> AppResult<()> {
        warning(format!("The file '{}' already exists.", path.display()));
        print!("Replace it with {rows} timesheet row(s)? [y/N]: ");
        io::stdout().flush().ok();

        let mut line = String::new();
        answer.read_line(&mut line)?;

        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => {
                info("Existing file will be overwritten.");
                Ok(())
            }
            _ => Err(AppError::Export(format!(
                "'{}' kept, nothing exported",
                path.display()
            ))),
        }
    }
}
