//! rTimebill library root.
//! Exposes the CLI parser, the high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::{AppError, AppResult};
use models::{AppUser, UserRole};

/// Per-invocation context: configuration plus the session user.
#[derive(Debug, Clone)]
pub struct Session {
    pub cfg: Config,
    pub user: AppUser,
}

/// Builds the session user from `--role` / `--client-id`.
pub fn session_user(role: &str, client_id: Option<&str>) -> AppResult<AppUser> {
    let role = UserRole::from_str_opt(role).ok_or_else(|| {
        AppError::InvalidParameter(format!("unknown role '{role}' (expected admin or client)"))
    })?;

    match role {
        UserRole::Admin => Ok(AppUser::admin()),
        UserRole::Client => {
            let id = client_id.filter(|c| !c.trim().is_empty()).ok_or_else(|| {
                AppError::InvalidParameter("--client-id is required with --role client".into())
            })?;
            Ok(AppUser::client(id))
        }
    }
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, session: &Session) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, session),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, session),
        Commands::Missing { .. } => cli::commands::missing::handle(&cli.command, session),
        Commands::Submit { .. } => cli::commands::submit::handle(&cli.command, session),
        Commands::Review { .. } => cli::commands::review::handle(&cli.command, session),
        Commands::Invoice { action } => cli::commands::invoice::handle(action, session),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, session),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // RUST_LOG=debug shows pipeline and rendering diagnostics
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();

    let cli = Cli::parse();

    // config is loaded once
    let mut cfg = Config::load()?;

    // dataset override from the command line
    if let Some(custom) = &cli.data {
        cfg.dataset = custom.clone();
    }

    let user = session_user(&cli.role, cli.client_id.as_deref())?;
    log::debug!("session user: {:?}", user);

    let session = Session { cfg, user };

    dispatch(&cli, &session)
}
