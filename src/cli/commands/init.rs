use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - a sample dataset, unless one already exists
pub fn handle(cli: &Cli) -> AppResult<()> {
    println!("⚙️  Initializing rTimebill…");

    Config::init_all(cli.data.clone(), cli.test)?;

    println!("📄 Config file : {}", Config::config_file().display());
    println!("🎉 rTimebill initialization completed!");
    Ok(())
}
