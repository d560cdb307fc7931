use crate::Session;
use crate::cli::commands::{load_store, query_from_view};
use crate::cli::parser::Commands;
use crate::core::{SortDirection, SortField, TimesheetView};
use crate::errors::AppResult;
use crate::models::Timesheet;
use crate::store::Snapshot;
use crate::ui::messages::{header, info};
use crate::utils::colors::paint_timesheet_status;
use crate::utils::date::format_date;
use crate::utils::format_hours;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, session: &Session) -> AppResult<()> {
    if let Commands::List {
        view,
        sort,
        asc,
        page,
        page_size,
    } = cmd
    {
        let store = load_store(session)?;
        let snap = store.snapshot();

        let mut query = query_from_view(view, session)?;
        query.sort_field = SortField::parse(sort);
        query.sort_direction = if *asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        query.page = *page;
        if let Some(size) = page_size {
            query.page_size = *size;
        }

        let result = TimesheetView::compute(&snap, &session.user, &query)?;

        header(format!("Week ending {}", format_date(query.week)));

        if result.by_week.is_empty() {
            info("No timesheets for this week.");
        } else if result.page.is_empty() {
            info(format!(
                "Page {} is out of range ({} page(s)).",
                query.page, result.total_pages
            ));
        } else {
            print!("{}", render_table(&snap, &result.page));
            println!(
                "Page {}/{} · {} timesheet(s) · sorted by {} {}",
                query.page,
                result.total_pages,
                result.by_week.len(),
                query.sort_field.as_str(),
                if *asc { "asc" } else { "desc" }
            );
        }

        if !result.missing.is_empty() {
            println!("Missing: {} employee(s)", result.missing.len());
        }
    }
    Ok(())
}

pub(crate) fn render_table(snap: &Snapshot, rows: &[Timesheet]) -> String {
    let mut table = Table::new(vec![
        Column::left("ID"),
        Column::left("Employee"),
        Column::left("Client"),
        Column::left("Week Ending"),
        Column::right("Hours"),
        Column::left("Status"),
        Column::left("Comments"),
    ]);

    for ts in rows {
        let client = snap
            .client_for_employee(&ts.employee_id)
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        table.add_row(vec![
            ts.id.clone(),
            snap.employee_name(&ts.employee_id).to_string(),
            client.to_string(),
            ts.week_ending.to_string(),
            format_hours(ts.hours),
            paint_timesheet_status(ts.status),
            ts.comments.clone().unwrap_or_default(),
        ]);
    }

    table.render()
}
