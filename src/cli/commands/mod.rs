pub mod config;
pub mod export;
pub mod init;
pub mod invoice;
pub mod list;
pub mod missing;
pub mod review;
pub mod submit;

use crate::Session;
use crate::cli::parser::ViewArgs;
use crate::core::{StatusFilter, TimesheetQuery};
use crate::errors::AppResult;
use crate::store::{Dataset, Store};
use crate::utils::date;

/// Loads the session dataset (sample data when the file does not exist yet).
pub(crate) fn load_store(session: &Session) -> AppResult<Store> {
    let ds = Dataset::load_or_sample(&session.cfg.dataset_path())?;
    Ok(Store::new(ds))
}

/// Writes the store back to the session dataset file.
pub(crate) fn save_store(session: &Session, store: &Store) -> AppResult<()> {
    let path = session.cfg.dataset_path();
    store.to_dataset().save(&path)?;
    log::debug!("dataset saved to {}", path.display());
    Ok(())
}

/// Query for the filters of `view`, with the configured page size.
pub(crate) fn query_from_view(view: &ViewArgs, session: &Session) -> AppResult<TimesheetQuery> {
    let week = match &view.week {
        Some(w) => date::parse_date(w)?,
        None => date::current_week_ending(),
    };

    Ok(TimesheetQuery {
        status: StatusFilter::parse(&view.status)?,
        employee: view.employee.clone(),
        client: view.client.clone(),
        page_size: session.cfg.page_size,
        ..TimesheetQuery::for_week(week)
    })
}
