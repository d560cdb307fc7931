// src/export/model.rs

use crate::models::Timesheet;
use crate::store::Snapshot;
use serde::Serialize;

/// Flat row for CSV / JSON export of a timesheet view.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TimesheetExport {
    pub id: String,
    pub employee_id: String,
    pub employee: String,
    pub client: String,
    pub week_ending: String,
    pub hours: f64,
    pub status: String,
    pub comments: String,
    pub submitted_at: String,
}

pub(crate) fn timesheet_to_export(snap: &Snapshot, ts: &Timesheet) -> TimesheetExport {
    let client = snap
        .client_for_employee(&ts.employee_id)
        .map(|c| c.name.clone())
        .unwrap_or_default();

    TimesheetExport {
        id: ts.id.clone(),
        employee_id: ts.employee_id.clone(),
        employee: snap.employee_name(&ts.employee_id).to_string(),
        client,
        week_ending: ts.week_ending.format("%Y-%m-%d").to_string(),
        hours: ts.hours,
        status: ts.status.as_str().to_string(),
        comments: ts.comments.clone().unwrap_or_default(),
        submitted_at: ts.submitted_at.to_rfc3339(),
    }
}

pub fn timesheets_to_export(snap: &Snapshot, timesheets: &[Timesheet]) -> Vec<TimesheetExport> {
    timesheets
        .iter()
        .map(|ts| timesheet_to_export(snap, ts))
        .collect()
}
