//! Enemy targeting settings and scenario inspection.
//!
//! Run with: `enemy <command>`; with no command the current settings are listed.

mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{List, Reset, Scan, Set, Toggle};
use config::CliConfig;

/// Enemy targeting settings and scenario inspection
#[derive(Parser)]
#[command(name = "enemy")]
#[command(about = "Configure which entities count as enemies", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (overrides ENEMY_CONFIG_PATH)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write logs to DIR/enemy.log (overrides ENEMY_LOG_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Parser)]
enum Command {
    /// Show every option and whether it is enabled
    List(List),

    /// Turn an option on or off
    Set(Set),

    /// Flip an option
    Toggle(Toggle),

    /// Restore the default settings
    Reset(Reset),

    /// Find enemies in a recorded scenario
    Scan(Scan),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for ENEMY_CONFIG_PATH and friends)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = CliConfig::from_env().with_overrides(cli.config, cli.log_dir);
    let _guard = logging::setup_logging(cli.verbose, config.log_dir.as_deref())?;

    tracing::debug!("Settings file: {}", config.config_path.display());

    match cli.command.unwrap_or_else(|| Command::List(List::default())) {
        Command::List(cmd) => cmd.execute(&config),
        Command::Set(cmd) => cmd.execute(&config),
        Command::Toggle(cmd) => cmd.execute(&config),
        Command::Reset(cmd) => cmd.execute(&config),
        Command::Scan(cmd) => cmd.execute(&config),
    }
}
