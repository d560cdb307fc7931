use crate::Session;
use crate::cli::commands::{load_store, save_store};
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::models::NewTimesheet;
use crate::ui::messages::success;
use crate::utils::date::parse_date;

pub fn handle(cmd: &Commands, session: &Session) -> AppResult<()> {
    if let Commands::Submit {
        employee,
        week,
        hours,
        comments,
    } = cmd
    {
        let mut store = load_store(session)?;

        let id = store.create_timesheet(NewTimesheet {
            employee_id: employee.clone(),
            week_ending: parse_date(week)?,
            hours: *hours,
            status: None,
            comments: comments.clone(),
        })?;

        save_store(session, &store)?;
        success(format!("Timesheet {id} submitted for {employee}"));
    }
    Ok(())
}
