use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rTimebill
/// CLI application to review weekly timesheets and invoice approved hours
#[derive(Parser)]
#[command(
    name = "rtimebill",
    version = env!("CARGO_PKG_VERSION"),
    about = "Review weekly timesheets and bill approved hours as PDF invoices",
    long_about = None
)]
pub struct Cli {
    /// Override dataset path (useful for tests or a custom dataset)
    #[arg(global = true, long = "data")]
    pub data: Option<String>,

    /// Session role: admin or client
    #[arg(global = true, long = "role", default_value = "admin")]
    pub role: String,

    /// Client id of the session user (required with --role client)
    #[arg(global = true, long = "client-id")]
    pub client_id: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filters shared by the timesheet views.
#[derive(Args, Clone, Debug)]
pub struct ViewArgs {
    /// Week ending date (YYYY-MM-DD); defaults to this week's Friday
    #[arg(long)]
    pub week: Option<String>,

    /// all, pending, approved or rejected
    #[arg(long, default_value = "all")]
    pub status: String,

    /// Only this employee id
    #[arg(long)]
    pub employee: Option<String>,

    /// Only employees of this client id (admin only)
    #[arg(long)]
    pub client: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and a sample dataset
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// List the timesheets of a week
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// employee, hours, weekEnding or status (anything else sorts by submission time)
        #[arg(long, default_value = "weekEnding")]
        sort: String,

        /// Sort ascending (default is descending)
        #[arg(long)]
        asc: bool,

        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long = "page-size")]
        page_size: Option<usize>,
    },

    /// Employees without a timesheet for a week
    Missing {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Submit a weekly timesheet for an employee
    Submit {
        /// Employee id
        employee: String,

        /// Week ending date (YYYY-MM-DD)
        week: String,

        /// Hours worked in the week
        #[arg(allow_hyphen_values = true)]
        hours: f64,

        #[arg(long)]
        comments: Option<String>,
    },

    /// Approve or reject a timesheet
    Review {
        /// Timesheet id
        id: String,

        /// pending, approved or rejected
        status: String,

        #[arg(long)]
        comments: Option<String>,
    },

    /// Manage invoices
    Invoice {
        #[command(subcommand)]
        action: InvoiceCommands,
    },

    /// Export the timesheets of a week
    Export {
        #[command(flatten)]
        view: ViewArgs,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, default_value = "weekEnding")]
        sort: String,

        #[arg(long)]
        asc: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum InvoiceCommands {
    /// Create a draft invoice for a client and period
    Create {
        #[arg(long)]
        client: String,

        /// Period start (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Period end (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// Timesheet ids to bill; defaults to the client's unbilled approved
        /// timesheets in the period
        #[arg(long = "timesheet")]
        timesheets: Vec<String>,
    },

    /// Change the status of an invoice (draft, sent, paid)
    Status { id: String, status: String },

    /// List invoices
    List,

    /// Render an invoice as PDF
    Pdf {
        id: String,

        /// Output directory (defaults to the configured one)
        #[arg(long = "out-dir")]
        out_dir: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
}
