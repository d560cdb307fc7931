use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// Hourly rate, used verbatim in invoice amounts.
    pub rate: f64,
    pub client_id: String,
}
