use crate::Session;
use crate::cli::commands::{load_store, save_store};
use crate::cli::parser::Commands;
use crate::errors::{AppError, AppResult};
use crate::models::TimesheetStatus;
use crate::ui::messages::success;
use crate::utils::colors::paint_timesheet_status;

pub fn handle(cmd: &Commands, session: &Session) -> AppResult<()> {
    if let Commands::Review {
        id,
        status,
        comments,
    } = cmd
    {
        if !session.user.is_admin() {
            // role is advisory, but the CLI keeps reviews to admins
            return Err(AppError::InvalidParameter(
                "only admins can review timesheets".into(),
            ));
        }

        let status = TimesheetStatus::parse(status)?;
        let mut store = load_store(session)?;
        store.update_timesheet_status(id, status, comments.clone())?;
        save_store(session, &store)?;

        success(format!("Timesheet {id} is now {}", paint_timesheet_status(status)));
    }
    Ok(())
}
