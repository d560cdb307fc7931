use crate::Session;
use crate::cli::commands::{load_store, query_from_view};
use crate::cli::parser::Commands;
use crate::core::TimesheetView;
use crate::errors::AppResult;
use crate::ui::messages::{header, success};
use crate::utils::date::format_date;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, session: &Session) -> AppResult<()> {
    if let Commands::Missing { view } = cmd {
        let store = load_store(session)?;
        let snap = store.snapshot();

        let query = query_from_view(view, session)?;
        let result = TimesheetView::compute(&snap, &session.user, &query)?;

        header(format!("Missing timesheets, week ending {}", format_date(query.week)));

        if result.missing.is_empty() {
            success("Every employee has submitted.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::left("ID"),
            Column::left("Employee"),
            Column::left("Client"),
        ]);
        for emp in &result.missing {
            table.add_row(vec![
                emp.id.clone(),
                emp.name.clone(),
                snap.client_name(&emp.client_id).to_string(),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
