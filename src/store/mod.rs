//! In-memory collections with copy-on-write snapshots.
//!
//! Every mutation builds a fresh vector and swaps the shared pointer, so a
//! `Snapshot` taken before a write keeps seeing the old data.

pub mod dataset;
pub mod seed;

pub use dataset::Dataset;

use crate::errors::{AppError, AppResult};
use crate::models::timesheet::validate_hours;
use crate::models::{
    Client, Employee, Invoice, InvoiceStatus, NewTimesheet, Timesheet, TimesheetStatus,
    TimesheetUpdate,
};
use chrono::Utc;
use std::sync::Arc;

pub const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";
pub const UNKNOWN_CLIENT: &str = "Unknown Client";

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub clients: Arc<Vec<Client>>,
    pub employees: Arc<Vec<Employee>>,
    pub timesheets: Arc<Vec<Timesheet>>,
    pub invoices: Arc<Vec<Invoice>>,
}

impl Snapshot {
    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn timesheet(&self, id: &str) -> Option<&Timesheet> {
        self.timesheets.iter().find(|t| t.id == id)
    }

    pub fn invoice(&self, id: &str) -> Option<&Invoice> {
        self.invoices.iter().find(|i| i.id == id)
    }

    pub fn employee_name(&self, id: &str) -> &str {
        self.employee(id)
            .map(|e| e.name.as_str())
            .unwrap_or(UNKNOWN_EMPLOYEE)
    }

    pub fn client_name(&self, id: &str) -> &str {
        self.client(id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_CLIENT)
    }

    pub fn client_for_employee(&self, employee_id: &str) -> Option<&Client> {
        self.employee(employee_id)
            .and_then(|e| self.client(&e.client_id))
    }

    /// Ids of the employees assigned to `client_id`.
    pub fn employee_ids_of_client(&self, client_id: &str) -> Vec<&str> {
        self.employees
            .iter()
            .filter(|e| e.client_id == client_id)
            .map(|e| e.id.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    current: Snapshot,
}

impl From<Dataset> for Store {
    fn from(ds: Dataset) -> Self {
        Self {
            current: Snapshot {
                clients: Arc::new(ds.clients),
                employees: Arc::new(ds.employees),
                timesheets: Arc::new(ds.timesheets),
                invoices: Arc::new(ds.invoices),
            },
        }
    }
}

impl Store {
    pub fn new(dataset: Dataset) -> Self {
        Self::from(dataset)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    pub fn to_dataset(&self) -> Dataset {
        Dataset {
            clients: self.current.clients.as_ref().clone(),
            employees: self.current.employees.as_ref().clone(),
            timesheets: self.current.timesheets.as_ref().clone(),
            invoices: self.current.invoices.as_ref().clone(),
        }
    }

    pub fn clients(&self) -> Arc<Vec<Client>> {
        Arc::clone(&self.current.clients)
    }

    pub fn employees(&self) -> Arc<Vec<Employee>> {
        Arc::clone(&self.current.employees)
    }

    pub fn timesheets(&self) -> Arc<Vec<Timesheet>> {
        Arc::clone(&self.current.timesheets)
    }

    pub fn invoices(&self) -> Arc<Vec<Invoice>> {
        Arc::clone(&self.current.invoices)
    }

    pub fn invoice(&self, id: &str) -> Option<Invoice> {
        self.current.invoice(id).cloned()
    }

    // ------------------------------------------------
    // Timesheets
    // ------------------------------------------------

    /// Records an employee submission and returns the new id.
    pub fn create_timesheet(&mut self, new: NewTimesheet) -> AppResult<String> {
        validate_hours(new.hours)?;
        if self.current.employee(&new.employee_id).is_none() {
            return Err(AppError::not_found("Employee", new.employee_id));
        }

        let now = Utc::now();
        let id = unique_id(
            &format!("ts-{}", now.timestamp_millis()),
            |candidate| self.current.timesheet(candidate).is_some(),
        );

        let ts = Timesheet {
            id: id.clone(),
            employee_id: new.employee_id,
            week_ending: new.week_ending,
            hours: new.hours,
            status: new.status.unwrap_or_default(),
            comments: new.comments,
            submitted_at: now,
        };

        let mut next = self.current.timesheets.as_ref().clone();
        next.push(ts);
        self.current.timesheets = Arc::new(next);

        log::debug!("timesheet {id} created");
        Ok(id)
    }

    pub fn update_timesheet(&mut self, id: &str, update: &TimesheetUpdate) -> AppResult<()> {
        if let Some(h) = update.hours {
            validate_hours(h)?;
        }
        if let Some(emp) = &update.employee_id
            && self.current.employee(emp).is_none()
        {
            return Err(AppError::not_found("Employee", emp.clone()));
        }
        self.replace_timesheet(id, |ts| update.apply_to(ts))
    }

    /// Review action. Existing comments are kept when none are given.
    pub fn update_timesheet_status(
        &mut self,
        id: &str,
        status: TimesheetStatus,
        comments: Option<String>,
    ) -> AppResult<()> {
        let update = TimesheetUpdate {
            status: Some(status),
            comments: comments.filter(|c| !c.is_empty()),
            ..Default::default()
        };
        self.replace_timesheet(id, |ts| update.apply_to(ts))
    }

    fn replace_timesheet<F>(&mut self, id: &str, f: F) -> AppResult<()>
    where
        F: Fn(&Timesheet) -> Timesheet,
    {
        if self.current.timesheet(id).is_none() {
            return Err(AppError::not_found("Timesheet", id));
        }
        let next: Vec<Timesheet> = self
            .current
            .timesheets
            .iter()
            .map(|ts| if ts.id == id { f(ts) } else { ts.clone() })
            .collect();
        self.current.timesheets = Arc::new(next);
        Ok(())
    }

    // ------------------------------------------------
    // Invoices
    // ------------------------------------------------

    pub(crate) fn push_invoice(&mut self, invoice: Invoice) {
        let mut next = self.current.invoices.as_ref().clone();
        next.push(invoice);
        self.current.invoices = Arc::new(next);
    }

    /// Any status may move to any other; repeating the same status is a no-op.
    pub fn update_invoice_status(&mut self, id: &str, status: InvoiceStatus) -> AppResult<()> {
        if self.current.invoice(id).is_none() {
            return Err(AppError::not_found("Invoice", id));
        }
        let next: Vec<Invoice> = self
            .current
            .invoices
            .iter()
            .map(|inv| {
                if inv.id == id {
                    Invoice {
                        status,
                        ..inv.clone()
                    }
                } else {
                    inv.clone()
                }
            })
            .collect();
        self.current.invoices = Arc::new(next);
        Ok(())
    }
}

/// Appends `-2`, `-3`, ... until `taken` no longer matches.
pub(crate) fn unique_id<F>(base: &str, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|c| !taken(c))
        .unwrap_or_else(|| base.to_string())
}
