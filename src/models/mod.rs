pub mod client;
pub mod employee;
pub mod invoice;
pub mod timesheet;
pub mod user;

pub use client::Client;
pub use employee::Employee;
pub use invoice::{Invoice, InvoiceStatus};
pub use timesheet::{NewTimesheet, Timesheet, TimesheetStatus, TimesheetUpdate};
pub use user::{AppUser, UserRole};
