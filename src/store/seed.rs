//! Built-in sample data: three clients, five employees and two weeks of
//! timesheets around the current week ending.

use crate::models::{Client, Employee, Invoice, InvoiceStatus, Timesheet, TimesheetStatus};
use crate::store::Dataset;
use crate::utils::date::current_week_ending;
use chrono::{DateTime, Duration, NaiveDate, Utc};

fn client(id: &str, name: &str, email: &str) -> Client {
    Client {
        id: id.into(),
        name: name.into(),
        email: Some(email.into()),
    }
}

fn employee(id: &str, name: &str, rate: f64, client_id: &str) -> Employee {
    Employee {
        id: id.into(),
        name: name.into(),
        rate,
        client_id: client_id.into(),
    }
}

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn timesheet(
    id: &str,
    employee_id: &str,
    week_ending: NaiveDate,
    hours: f64,
    status: TimesheetStatus,
    comments: Option<&str>,
    submitted_at: &str,
) -> Timesheet {
    Timesheet {
        id: id.into(),
        employee_id: employee_id.into(),
        week_ending,
        hours,
        status,
        comments: comments.map(str::to_string),
        submitted_at: at(submitted_at),
    }
}

pub fn sample_dataset() -> Dataset {
    sample_dataset_for(current_week_ending())
}

/// Sample data anchored on `this_week`; the previous week is fully billed.
pub fn sample_dataset_for(this_week: NaiveDate) -> Dataset {
    use TimesheetStatus::*;

    let last_week = this_week - Duration::days(7);
    let period_start = last_week - Duration::days(6);

    let clients = vec![
        client("client-1", "Acme Corporation", "billing@acme.com"),
        client("client-2", "Globex Industries", "accounts@globex.com"),
        client("client-3", "Stark Enterprises", "finance@stark.com"),
    ];

    let employees = vec![
        employee("emp-1", "John Doe", 50.0, "client-1"),
        employee("emp-2", "Jane Smith", 65.0, "client-1"),
        employee("emp-3", "Bob Johnson", 45.0, "client-2"),
        employee("emp-4", "Alice Williams", 55.0, "client-2"),
        employee("emp-5", "Michael Brown", 70.0, "client-3"),
    ];

    let timesheets = vec![
        timesheet(
            "ts-1",
            "emp-1",
            last_week,
            40.0,
            Approved,
            Some("Approved on time"),
            "2023-03-15T14:30:00Z",
        ),
        timesheet(
            "ts-2",
            "emp-2",
            last_week,
            38.0,
            Approved,
            None,
            "2023-03-15T16:45:00Z",
        ),
        timesheet(
            "ts-3",
            "emp-1",
            this_week,
            42.0,
            Pending,
            None,
            "2023-03-22T09:15:00Z",
        ),
        timesheet(
            "ts-4",
            "emp-3",
            last_week,
            35.0,
            Approved,
            None,
            "2023-03-14T11:20:00Z",
        ),
        timesheet(
            "ts-5",
            "emp-4",
            last_week,
            42.0,
            Rejected,
            Some("Hours exceed contract limit"),
            "2023-03-15T10:10:00Z",
        ),
        timesheet(
            "ts-6",
            "emp-3",
            this_week,
            38.0,
            Pending,
            None,
            "2023-03-22T08:30:00Z",
        ),
        timesheet(
            "ts-7",
            "emp-5",
            last_week,
            45.0,
            Approved,
            None,
            "2023-03-15T15:00:00Z",
        ),
        timesheet(
            "ts-8",
            "emp-5",
            this_week,
            40.0,
            Pending,
            None,
            "2023-03-22T14:25:00Z",
        ),
    ];

    let invoice = |id: &str,
                   client_id: &str,
                   ts: &[&str],
                   total: f64,
                   status: InvoiceStatus,
                   created: &str| Invoice {
        id: id.into(),
        client_id: client_id.into(),
        timesheets: ts.iter().map(|s| s.to_string()).collect(),
        total_amount: total,
        status,
        created_at: at(created),
        period_start,
        period_end: last_week,
    };

    let invoices = vec![
        invoice(
            "inv-1",
            "client-1",
            &["ts-1", "ts-2"],
            3970.0,
            InvoiceStatus::Sent,
            "2023-03-16T10:00:00Z",
        ),
        invoice(
            "inv-2",
            "client-2",
            &["ts-4"],
            1575.0,
            InvoiceStatus::Paid,
            "2023-03-16T11:30:00Z",
        ),
        invoice(
            "inv-3",
            "client-3",
            &["ts-7"],
            3150.0,
            InvoiceStatus::Draft,
            "2023-03-16T14:15:00Z",
        ),
    ];

    Dataset {
        clients,
        employees,
        timesheets,
        invoices,
    }
}
