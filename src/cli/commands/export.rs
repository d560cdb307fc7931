use crate::Session;
use crate::cli::commands::{load_store, query_from_view};
use crate::cli::parser::Commands;
use crate::core::{SortDirection, SortField, TimesheetView};
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, session: &Session) -> AppResult<()> {
    if let Commands::Export {
        view,
        format,
        file,
        sort,
        asc,
        force,
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

        let result = TimesheetView::compute(&snap, &session.user, &query)?;
        ExportLogic::export(&snap, &result.by_week, *format, file, *force)?;
    }
    Ok(())
}
