//! Timesheet view pipeline.
//!
//! Stages run in a fixed order, each on the narrower output of the previous one:
//! role → status → employee → client → week → sort → paginate.

use crate::errors::{AppError, AppResult};
use crate::models::{AppUser, Employee, Timesheet, TimesheetStatus};
use crate::store::Snapshot;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TimesheetStatus),
}

impl StatusFilter {
    pub fn parse(s: &str) -> AppResult<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        TimesheetStatus::parse(s).map(StatusFilter::Only)
    }

    pub fn matches(&self, status: TimesheetStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => *s == status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Employee,
    Hours,
    #[default]
    WeekEnding,
    Status,
    /// Fallback ordering for unrecognised field names.
    SubmittedAt,
}

impl SortField {
    /// Unknown names fall back to submission time.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "employee" => SortField::Employee,
            "hours" => SortField::Hours,
            "weekending" | "week-ending" | "week_ending" | "week" => SortField::WeekEnding,
            "status" => SortField::Status,
            _ => SortField::SubmittedAt,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Employee => "employee",
            SortField::Hours => "hours",
            SortField::WeekEnding => "weekEnding",
            SortField::Status => "status",
            SortField::SubmittedAt => "submittedAt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// UI-selected parameters of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetQuery {
    pub status: StatusFilter,
    pub employee: Option<String>,
    pub client: Option<String>,
    pub week: NaiveDate,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl TimesheetQuery {
    pub fn for_week(week: NaiveDate) -> Self {
        Self {
            status: StatusFilter::All,
            employee: None,
            client: None,
            week,
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.page_size == 0 {
            return Err(AppError::InvalidParameter(
                "page size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Role, status, employee and client stages.
pub fn filter_timesheets(
    snap: &Snapshot,
    user: &AppUser,
    query: &TimesheetQuery,
) -> Vec<Timesheet> {
    let mut filtered: Vec<Timesheet> = snap.timesheets.as_ref().clone();

    // 1. role
    if let Some(client_id) = user.scoped_client() {
        let ids: HashSet<&str> = snap.employee_ids_of_client(client_id).into_iter().collect();
        filtered.retain(|ts| ids.contains(ts.employee_id.as_str()));
        log::debug!("role filter ({client_id}): {} left", filtered.len());
    }

    // 2. status
    if query.status != StatusFilter::All {
        filtered.retain(|ts| query.status.matches(ts.status));
    }

    // 3. employee
    if let Some(emp) = non_empty(&query.employee) {
        filtered.retain(|ts| ts.employee_id == emp);
    }

    // 4. client, admin only
    if user.is_admin()
        && let Some(client_id) = non_empty(&query.client)
    {
        let ids: HashSet<&str> = snap.employee_ids_of_client(client_id).into_iter().collect();
        filtered.retain(|ts| ids.contains(ts.employee_id.as_str()));
    }

    log::debug!("filtered timesheets: {}", filtered.len());
    filtered
}

/// Exact week-ending match.
pub fn filter_by_week(timesheets: &[Timesheet], week: NaiveDate) -> Vec<Timesheet> {
    timesheets
        .iter()
        .filter(|ts| ts.week_ending == week)
        .cloned()
        .collect()
}

/// Stable sort; descending negates the comparison rather than reversing the output.
pub fn sort_timesheets(
    timesheets: &[Timesheet],
    snap: &Snapshot,
    field: SortField,
    direction: SortDirection,
) -> Vec<Timesheet> {
    let names: HashMap<&str, String> = if field == SortField::Employee {
        timesheets
            .iter()
            .map(|ts| {
                (
                    ts.employee_id.as_str(),
                    snap.employee_name(&ts.employee_id).to_lowercase(),
                )
            })
            .collect()
    } else {
        HashMap::new()
    };

    let mut sorted = timesheets.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, field, &names);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}

fn compare(
    a: &Timesheet,
    b: &Timesheet,
    field: SortField,
    names: &HashMap<&str, String>,
) -> Ordering {
    match field {
        SortField::Employee => {
            let na = names.get(a.employee_id.as_str());
            let nb = names.get(b.employee_id.as_str());
            na.cmp(&nb)
        }
        SortField::Hours => a.hours.total_cmp(&b.hours),
        SortField::WeekEnding => a.week_ending.cmp(&b.week_ending),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::SubmittedAt => a.submitted_at.cmp(&b.submitted_at),
    }
}

/// 1-based page; out-of-range pages (including 0) are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Roster entries with no timesheet for `week` among `visible`.
///
/// `visible` is the filtered view, so the result follows the same role, status,
/// employee and client filters; the roster itself is not narrowed.
pub fn missing_employees(
    roster: &[Employee],
    visible: &[Timesheet],
    week: NaiveDate,
) -> Vec<Employee> {
    let submitted: HashSet<&str> = visible
        .iter()
        .filter(|ts| ts.week_ending == week)
        .map(|ts| ts.employee_id.as_str())
        .collect();

    roster
        .iter()
        .filter(|e| !submitted.contains(e.id.as_str()))
        .cloned()
        .collect()
}

/// Every derived view for one set of inputs, recomputed on demand.
#[derive(Debug, Clone, Default)]
pub struct TimesheetView {
    pub filtered: Vec<Timesheet>,
    /// Week-filtered and sorted.
    pub by_week: Vec<Timesheet>,
    pub page: Vec<Timesheet>,
    pub missing: Vec<Employee>,
    pub total_pages: usize,
}

impl TimesheetView {
    pub fn compute(snap: &Snapshot, user: &AppUser, query: &TimesheetQuery) -> AppResult<Self> {
        query.validate()?;

        let filtered = filter_timesheets(snap, user, query);
        let week = filter_by_week(&filtered, query.week);
        let by_week = sort_timesheets(&week, snap, query.sort_field, query.sort_direction);
        let page = paginate(&by_week, query.page, query.page_size).to_vec();
        let missing = missing_employees(&snap.employees, &by_week, query.week);
        let total_pages = total_pages(by_week.len(), query.page_size);

        Ok(Self {
            filtered,
            by_week,
            page,
            missing,
            total_pages,
        })
    }
}
