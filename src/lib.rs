#![deny(clippy::disallowed_methods)]

pub mod app_home;
pub mod atomic_file;
pub mod cli;
pub mod database;
pub mod database_path;
pub mod error;
pub mod index;
pub mod key;
pub mod photo_metadata;
pub mod thumbnail;
pub mod tracing;

use crate::cli::Cli;
use clap::CommandFactory;
use clap::FromArgMatches;
pub use error::Error;
pub use error::Result;

pub fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::command();
    let cli = Cli::from_arg_matches(&cli.get_matches())?;

    // Logging goes to stderr; stdout carries index rows and show output
    crate::tracing::init_tracing(
        cli.global_args.log_level(),
        cli.global_args.json_log_behaviour(),
    )?;
    ::tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        revision = option_env!("GIT_REVISION").unwrap_or("unknown"),
        "Starting pictures"
    );

    cli.invoke()?;
    Ok(())
}
