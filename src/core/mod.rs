pub mod invoice;
pub mod pipeline;

pub use invoice::{InvoiceData, InvoiceLineItem};
pub use pipeline::{SortDirection, SortField, StatusFilter, TimesheetQuery, TimesheetView};
