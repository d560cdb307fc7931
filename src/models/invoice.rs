use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(InvoiceStatus::Draft),
            "sent" => Ok(InvoiceStatus::Sent),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(AppError::InvalidStatus(format!(
                "'{other}' (expected draft, sent or paid)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub client_id: String,
    /// Ids of the billed timesheets, in billing order.
    pub timesheets: Vec<String>,
    /// Frozen at creation time; never recomputed from later timesheet or rate edits.
    pub total_amount: f64,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

impl Invoice {
    /// Printed invoice number: the id without its `inv-` prefix.
    pub fn number(&self) -> &str {
        self.id.strip_prefix("inv-").unwrap_or(&self.id)
    }
}
