//! Terminal colors for review states.
use crate::models::{InvoiceStatus, TimesheetStatus};
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI pattern"));

pub fn paint_timesheet_status(status: TimesheetStatus) -> String {
    let colour = match status {
        TimesheetStatus::Approved => Colour::Green,
        TimesheetStatus::Pending => Colour::Yellow,
        TimesheetStatus::Rejected => Colour::Red,
    };
    colour.paint(status.as_str()).to_string()
}

pub fn paint_invoice_status(status: InvoiceStatus) -> String {
    let colour = match status {
        InvoiceStatus::Draft => Colour::White,
        InvoiceStatus::Sent => Colour::Blue,
        InvoiceStatus::Paid => Colour::Green,
    };
    colour.paint(status.as_str()).to_string()
}

/// Width-safe plain text, without escape sequences.
pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}
