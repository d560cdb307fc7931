//! Invoice aggregation: frozen totals at creation, and the flat projection
//! handed to the PDF renderer.
//!
//! Lookup misses never fail: a timesheet that cannot be found is left out of both
//! the total and the line items, and a timesheet whose employee cannot be found
//! is billed as an "Unknown Employee" line at rate 0.

use crate::errors::{AppError, AppResult};
use crate::models::{Invoice, InvoiceStatus, Timesheet, TimesheetStatus};
use crate::store::{Snapshot, Store, UNKNOWN_CLIENT, UNKNOWN_EMPLOYEE, unique_id};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// One billed timesheet as printed on the invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    pub employee: String,
    pub week_ending: NaiveDate,
    pub hours: f64,
    pub rate: f64,
    pub amount: f64,
}

/// Renderer-ready invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub items: Vec<InvoiceLineItem>,
    /// The invoice's stored total, not the sum of `items`.
    pub total_amount: f64,
    pub generated_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl InvoiceData {
    /// Sum of the line amounts as they are today.
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|i| i.amount).sum()
    }
}

/// hours × rate of one timesheet, 0 when its employee is unknown.
fn billed_amount(snap: &Snapshot, ts: &Timesheet) -> f64 {
    match snap.employee(&ts.employee_id) {
        Some(emp) => ts.hours * emp.rate,
        None => {
            log::warn!(
                "timesheet {}: employee {} not found, billed as 0",
                ts.id,
                ts.employee_id
            );
            0.0
        }
    }
}

/// Σ hours × rate over the resolvable timesheets in `timesheet_ids`.
pub fn compute_invoice_total(snap: &Snapshot, timesheet_ids: &[String]) -> f64 {
    timesheet_ids
        .iter()
        .filter_map(|id| {
            let ts = snap.timesheet(id);
            if ts.is_none() {
                log::warn!("timesheet {id} not found, skipped from invoice total");
            }
            ts
        })
        .map(|ts| billed_amount(snap, ts))
        .sum()
}

/// Creates a draft invoice with a frozen total and returns its id.
pub fn create_invoice(
    store: &mut Store,
    client_id: &str,
    timesheet_ids: &[String],
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> AppResult<String> {
    if period_start > period_end {
        return Err(AppError::InvalidParameter(format!(
            "invoice period starts after it ends ({period_start} > {period_end})"
        )));
    }

    let snap = store.snapshot();

    // every resolvable timesheet must belong to one of the client's employees
    for id in timesheet_ids {
        let Some(ts) = snap.timesheet(id) else {
            continue;
        };
        if let Some(emp) = snap.employee(&ts.employee_id)
            && emp.client_id != client_id
        {
            return Err(AppError::InvalidParameter(format!(
                "timesheet {id} belongs to client {}, not {client_id}",
                emp.client_id
            )));
        }
    }

    let total_amount = compute_invoice_total(&snap, timesheet_ids);
    let created_at = Utc::now();

    let millis = created_at.timestamp_millis().rem_euclid(1_000_000);
    let id = unique_id(&format!("inv-{millis:06}"), |c| snap.invoice(c).is_some());

    store.push_invoice(Invoice {
        id: id.clone(),
        client_id: client_id.to_string(),
        timesheets: timesheet_ids.to_vec(),
        total_amount,
        status: InvoiceStatus::Draft,
        created_at,
        period_start,
        period_end,
    });

    log::info!("invoice {id} created for {client_id}: total {total_amount:.2}");
    Ok(id)
}

pub fn update_invoice_status(store: &mut Store, id: &str, status: InvoiceStatus) -> AppResult<()> {
    store.update_invoice_status(id, status)
}

/// Projects `invoice` for rendering. Line amounts are recomputed from current
/// data, while `total_amount` keeps the frozen creation-time value.
pub fn format_invoice_data_for_pdf(
    snap: &Snapshot,
    invoice: &Invoice,
    notes: Option<&str>,
) -> InvoiceData {
    let client = snap.client(&invoice.client_id);
    if client.is_none() {
        log::warn!("invoice {}: client {} not found", invoice.id, invoice.client_id);
    }

    let items = invoice
        .timesheets
        .iter()
        .filter_map(|id| {
            let ts = snap.timesheet(id);
            if ts.is_none() {
                log::warn!("invoice {}: timesheet {id} not found, line omitted", invoice.id);
            }
            ts
        })
        .map(|ts| {
            let employee = snap.employee(&ts.employee_id);
            let rate = employee.map(|e| e.rate).unwrap_or(0.0);
            InvoiceLineItem {
                employee: employee
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string()),
                week_ending: ts.week_ending,
                hours: ts.hours,
                rate,
                amount: ts.hours * rate,
            }
        })
        .collect();

    InvoiceData {
        invoice_number: invoice.number().to_string(),
        client_name: client
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
        client_email: client.and_then(|c| c.email.clone()),
        period_start: invoice.period_start,
        period_end: invoice.period_end,
        items,
        total_amount: invoice.total_amount,
        generated_at: invoice.created_at,
        notes: notes.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string),
    }
}

/// Approved timesheets of `client_id`'s employees that no invoice references yet,
/// optionally limited to week endings inside `[from, to]`.
pub fn unbilled_timesheets(
    snap: &Snapshot,
    client_id: &str,
    period: Option<(NaiveDate, NaiveDate)>,
) -> Vec<Timesheet> {
    let billed: HashSet<&str> = snap
        .invoices
        .iter()
        .flat_map(|inv| inv.timesheets.iter().map(String::as_str))
        .collect();
    let employees: HashSet<&str> = snap.employee_ids_of_client(client_id).into_iter().collect();

    let mut out: Vec<Timesheet> = snap
        .timesheets
        .iter()
        .filter(|ts| ts.status == TimesheetStatus::Approved)
        .filter(|ts| employees.contains(ts.employee_id.as_str()))
        .filter(|ts| !billed.contains(ts.id.as_str()))
        .filter(|ts| match period {
            Some((from, to)) => ts.week_ending >= from && ts.week_ending <= to,
            None => true,
        })
        .cloned()
        .collect();
    out.sort_by(|a, b| a.week_ending.cmp(&b.week_ending).then_with(|| a.id.cmp(&b.id)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::sample_dataset_for;

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 3, 24).unwrap()
    }

    #[test]
    fn unbilled_skips_invoiced_and_unapproved() {
        let mut store = Store::new(sample_dataset_for(week()));
        store
            .update_timesheet_status("ts-3", TimesheetStatus::Approved, None)
            .unwrap();

        let snap = store.snapshot();
        let ids: Vec<String> = unbilled_timesheets(&snap, "client-1", None)
            .into_iter()
            .map(|t| t.id)
            .collect();
        // ts-1 and ts-2 are already on inv-1
        assert_eq!(ids, vec!["ts-3".to_string()]);

        let last_week = week() - chrono::Duration::days(7);
        assert!(unbilled_timesheets(&snap, "client-1", Some((last_week, last_week))).is_empty());
    }

    #[test]
    fn invoice_number_strips_prefix() {
        let store = Store::new(sample_dataset_for(week()));
        let snap = store.snapshot();
        let inv = snap.invoice("inv-2").unwrap();
        let data = format_invoice_data_for_pdf(&snap, inv, Some("  "));
        assert_eq!(data.invoice_number, "2");
        assert_eq!(data.client_name, "Globex Industries");
        assert_eq!(data.notes, None);
    }

    #[test]
    fn other_clients_timesheets_are_refused() {
        let mut store = Store::new(sample_dataset_for(week()));

        // ts-8 is Michael Brown's, who works for client-3
        let res = create_invoice(
            &mut store,
            "client-1",
            &["ts-3".to_string(), "ts-8".to_string()],
            week() - chrono::Duration::days(6),
            week(),
        );
        assert!(matches!(res, Err(AppError::InvalidParameter(_))));
        assert_eq!(store.invoices().len(), 3);

        // unknown ids are not ownership violations, they just add nothing
        let id = create_invoice(
            &mut store,
            "client-1",
            &["ts-3".to_string(), "ts-404".to_string()],
            week() - chrono::Duration::days(6),
            week(),
        )
        .unwrap();
        assert_eq!(store.invoice(&id).unwrap().total_amount, 42.0 * 50.0);
    }

    #[test]
    fn reversed_period_is_rejected() {
        let mut store = Store::new(sample_dataset_for(week()));
        let res = create_invoice(
            &mut store,
            "client-1",
            &["ts-3".to_string()],
            week(),
            week() - chrono::Duration::days(1),
        );
        assert!(matches!(res, Err(AppError::InvalidParameter(_))));
    }
}
