use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimesheetStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl TimesheetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimesheetStatus::Pending => "pending",
            TimesheetStatus::Approved => "approved",
            TimesheetStatus::Rejected => "rejected",
        }
    }

    /// Strict parse: unknown strings are rejected.
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TimesheetStatus::Pending),
            "approved" => Ok(TimesheetStatus::Approved),
            "rejected" => Ok(TimesheetStatus::Rejected),
            other => Err(AppError::InvalidStatus(format!(
                "'{other}' (expected pending, approved or rejected)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timesheet {
    pub id: String,
    pub employee_id: String,
    /// Last day of the reported work week (ISO `YYYY-MM-DD` on the wire).
    pub week_ending: NaiveDate,
    pub hours: f64,
    pub status: TimesheetStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Employee submission payload; id and submission time are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimesheet {
    pub employee_id: String,
    pub week_ending: NaiveDate,
    pub hours: f64,
    pub status: Option<TimesheetStatus>,
    pub comments: Option<String>,
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimesheetUpdate {
    pub employee_id: Option<String>,
    pub week_ending: Option<NaiveDate>,
    pub hours: Option<f64>,
    pub status: Option<TimesheetStatus>,
    pub comments: Option<String>,
}

impl TimesheetUpdate {
    pub fn apply_to(&self, ts: &Timesheet) -> Timesheet {
        Timesheet {
            id: ts.id.clone(),
            employee_id: self
                .employee_id
                .clone()
                .unwrap_or_else(|| ts.employee_id.clone()),
            week_ending: self.week_ending.unwrap_or(ts.week_ending),
            hours: self.hours.unwrap_or(ts.hours),
            status: self.status.unwrap_or(ts.status),
            comments: self.comments.clone().or_else(|| ts.comments.clone()),
            submitted_at: ts.submitted_at,
        }
    }
}

/// Hours must be a finite, non-negative number.
pub fn validate_hours(hours: f64) -> AppResult<f64> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(AppError::InvalidParameter(format!(
            "hours must be a non-negative number, got {hours}"
        )));
    }
    Ok(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status_is_case_insensitive_and_strict() {
        assert_eq!(
            TimesheetStatus::parse("Approved").unwrap(),
            TimesheetStatus::Approved
        );
        assert!(matches!(
            TimesheetStatus::parse("done"),
            Err(AppError::InvalidStatus(_))
        ));
    }

    #[test]
    fn update_keeps_unspecified_fields() {
        let ts = Timesheet {
            id: "ts-1".into(),
            employee_id: "emp-1".into(),
            week_ending: NaiveDate::from_ymd_opt(2023, 3, 17).unwrap(),
            hours: 40.0,
            status: TimesheetStatus::Pending,
            comments: Some("first".into()),
            submitted_at: Utc::now(),
        };

        let upd = TimesheetUpdate {
            hours: Some(38.5),
            ..Default::default()
        };
        let out = upd.apply_to(&ts);

        assert_eq!(out.hours, 38.5);
        assert_eq!(out.comments.as_deref(), Some("first"));
        assert_eq!(out.status, TimesheetStatus::Pending);
    }

    #[test]
    fn negative_or_nan_hours_are_rejected() {
        assert!(validate_hours(-1.0).is_err());
        assert!(validate_hours(f64::NAN).is_err());
        assert_eq!(validate_hours(0.0).unwrap(), 0.0);
    }

    #[test]
    fn serializes_with_camel_case_and_iso_week() {
        let ts = Timesheet {
            id: "ts-9".into(),
            employee_id: "emp-2".into(),
            week_ending: NaiveDate::from_ymd_opt(2023, 3, 24).unwrap(),
            hours: 38.0,
            status: TimesheetStatus::Approved,
            comments: None,
            submitted_at: "2023-03-22T09:15:00Z".parse().unwrap(),
        };
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("\"weekEnding\":\"2023-03-24\""));
        assert!(json.contains("\"employeeId\":\"emp-2\""));
        assert!(json.contains("\"status\":\"approved\""));
        assert!(!json.contains("comments"));
    }
}
