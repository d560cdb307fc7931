use crate::Session;
use crate::cli::commands::{load_store, save_store};
use crate::cli::parser::InvoiceCommands;
use crate::core::invoice::{
    create_invoice, format_invoice_data_for_pdf, unbilled_timesheets, update_invoice_status,
};
use crate::errors::{AppError, AppResult};
use crate::export::{FileSink, export_invoice_pdf};
use crate::models::InvoiceStatus;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::paint_invoice_status;
use crate::utils::date::{format_date, parse_date};
use crate::utils::format_currency;
use crate::utils::path::expand_tilde;
use crate::utils::table::{Column, Table};

pub fn handle(action: &InvoiceCommands, session: &Session) -> AppResult<()> {
    match action {
        InvoiceCommands::Create {
            client,
            from,
            to,
            timesheets,
        } => create(session, client, from, to, timesheets),
        InvoiceCommands::Status { id, status } => set_status(session, id, status),
        InvoiceCommands::List => list(session),
        InvoiceCommands::Pdf { id, out_dir, notes } => {
            render(session, id, out_dir.as_deref(), notes.as_deref())
        }
    }
}

fn require_admin(session: &Session) -> AppResult<()> {
    if session.user.is_admin() {
        Ok(())
    } else {
        Err(AppError::InvalidParameter(
            "only admins can manage invoices".into(),
        ))
    }
}

fn create(session: &Session, client: &str, from: &str, to: &str, ids: &[String]) -> AppResult<()> {
    require_admin(session)?;

    let from = parse_date(from)?;
    let to = parse_date(to)?;

    let mut store = load_store(session)?;
    let snap = store.snapshot();
    if snap.client(client).is_none() {
        return Err(AppError::not_found("Client", client));
    }

    let ids: Vec<String> = if ids.is_empty() {
        unbilled_timesheets(&snap, client, Some((from, to)))
            .into_iter()
            .map(|ts| ts.id)
            .collect()
    } else {
        ids.to_vec()
    };

    if ids.is_empty() {
        warning("No unbilled approved timesheets in this period.");
        return Ok(());
    }

    let id = create_invoice(&mut store, client, &ids, from, to)?;
    save_store(session, &store)?;

    let total = store.invoice(&id).map(|inv| inv.total_amount).unwrap_or(0.0);
    success(format!(
        "Invoice {id} created for {} ({} timesheet(s), total {})",
        snap.client_name(client),
        ids.len(),
        format_currency(total)
    ));
    Ok(())
}

fn set_status(session: &Session, id: &str, status: &str) -> AppResult<()> {
    require_admin(session)?;

    let status = InvoiceStatus::parse(status)?;
    let mut store = load_store(session)?;
    update_invoice_status(&mut store, id, status)?;
    save_store(session, &store)?;

    success(format!("Invoice {id} is now {}", paint_invoice_status(status)));
    Ok(())
}

fn list(session: &Session) -> AppResult<()> {
    let store = load_store(session)?;
    let snap = store.snapshot();

    let visible: Vec<_> = snap
        .invoices
        .iter()
        .filter(|inv| match session.user.scoped_client() {
            Some(c) => inv.client_id == c,
            None => true,
        })
        .collect();

    header("Invoices");
    if visible.is_empty() {
        info("No invoices.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::left("ID"),
        Column::left("Client"),
        Column::left("Period"),
        Column::right("Timesheets"),
        Column::right("Total"),
        Column::left("Status"),
    ]);
    for inv in visible {
        table.add_row(vec![
            inv.id.clone(),
            snap.client_name(&inv.client_id).to_string(),
            format!(
                "{} to {}",
                format_date(inv.period_start),
                format_date(inv.period_end)
            ),
            inv.timesheets.len().to_string(),
            format_currency(inv.total_amount),
            paint_invoice_status(inv.status),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}

fn render(
    session: &Session,
    id: &str,
    out_dir: Option<&str>,
    notes: Option<&str>,
) -> AppResult<()> {
    let store = load_store(session)?;
    let snap = store.snapshot();

    let invoice = snap
        .invoice(id)
        .ok_or_else(|| AppError::not_found("Invoice", id))?;

    if let Some(c) = session.user.scoped_client()
        && invoice.client_id != c
    {
        return Err(AppError::not_found("Invoice", id));
    }

    let data = format_invoice_data_for_pdf(&snap, invoice, notes);
    if (data.items_total() - data.total_amount).abs() > 0.005 {
        warning(format!(
            "Line items now add up to {}, the invoice total was frozen at {}",
            format_currency(data.items_total()),
            format_currency(data.total_amount)
        ));
    }

    let dir = match out_dir {
        Some(d) => expand_tilde(d),
        None => session.cfg.output_path(),
    };
    let mut sink = FileSink::new(dir);
    export_invoice_pdf(&data, &session.cfg.letterhead(), &mut sink)?;
    Ok(())
}
